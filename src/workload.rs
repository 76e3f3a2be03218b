//! Synthetic CPU and memory workloads.
//!
//! These functions block the calling thread for their full duration. Handlers
//! run them on Tokio's blocking pool so probes stay responsive while a burn is
//! in progress.

use std::collections::TryReserveError;
use std::hint::black_box;
use std::time::{Duration, Instant};

use sha2::{Digest, Sha256};

use crate::config::BYTES_PER_MIB;

/// Result of a CPU burn.
#[derive(Debug, Clone)]
pub struct CpuBurn {
    /// Wall-clock time spent in the hashing loop
    pub elapsed: Duration,
    /// XOR of every digest produced, kept so the loop has an observable result
    pub checksum: [u8; 32],
}

impl CpuBurn {
    /// Elapsed seconds with two decimal places, e.g. "1.23s".
    pub fn computation_time(&self) -> String {
        format!("{:.2}s", self.elapsed.as_secs_f64())
    }
}

/// Hash the decimal representation of every integer in `0..iterations`.
pub fn burn_cpu(iterations: u64) -> CpuBurn {
    let start = Instant::now();
    let mut checksum = [0u8; 32];

    for i in 0..iterations {
        let digest = Sha256::digest(i.to_string().as_bytes());
        for (acc, byte) in checksum.iter_mut().zip(digest.iter()) {
            *acc ^= byte;
        }
    }

    let checksum = black_box(checksum);
    CpuBurn {
        elapsed: start.elapsed(),
        checksum,
    }
}

/// Allocate a fresh buffer of `bytes` spaces.
///
/// The buffer is released when the caller drops it. An allocation the
/// allocator refuses is returned as an error instead of aborting the process.
pub fn allocate_ballast(bytes: usize) -> Result<Vec<u8>, TryReserveError> {
    let mut ballast = Vec::new();
    ballast.try_reserve_exact(bytes)?;
    ballast.resize(bytes, b' ');
    Ok(black_box(ballast))
}

/// Human-readable size reported by `/memory`, in whole MiB.
pub fn ballast_label(bytes: usize) -> String {
    format!("{}MB", bytes / BYTES_PER_MIB)
}
