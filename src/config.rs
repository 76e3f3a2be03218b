//! Configuration loading and constants.
//!
//! Loads application configuration from an optional TOML file and defines the
//! constants for response payloads, workload sizes, cache headers and default
//! paths. `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// =============================================================================
// HTTP Server Defaults
// =============================================================================

/// Default bind address (all interfaces)
pub const DEFAULT_HTTP_HOST: &str = "0.0.0.0";

/// Default listening port
pub const DEFAULT_HTTP_PORT: u16 = 5000;

/// Seconds to wait for in-flight requests after SIGTERM/SIGINT
pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 30;

/// Cache-Control for every route: probe and load results must never be cached
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Response Payload Constants
// =============================================================================

pub const APP_MESSAGE: &str = "Cluster Autoscaler Demo App";
pub const STATUS_RUNNING: &str = "running";
pub const STATUS_HEALTHY: &str = "healthy";
pub const LOAD_MESSAGE: &str = "Heavy computation completed";
pub const MEMORY_MESSAGE: &str = "Memory allocated";

/// Pod identifier reported when the host variable is unset
pub const UNKNOWN_POD: &str = "unknown";

/// Environment variable holding the host/container identifier
pub const DEFAULT_POD_ENV_VAR: &str = "HOSTNAME";

// =============================================================================
// Workload Constants
// =============================================================================

/// Number of SHA-256 rounds performed by `/load`
pub const DEFAULT_LOAD_ITERATIONS: u64 = 5_000_000;

pub const BYTES_PER_MIB: usize = 1024 * 1024;

/// Ballast size in MiB allocated by `/memory`
pub const DEFAULT_MEMORY_MIB: usize = 100;

/// Ballast size in bytes allocated by `/memory` (104,857,600)
pub const DEFAULT_MEMORY_BYTES: usize = DEFAULT_MEMORY_MIB * BYTES_PER_MIB;

/// Label reported for the default ballast size
pub const DEFAULT_MEMORY_LABEL: &str = formatcp!("{}MB", DEFAULT_MEMORY_MIB);

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Configuration file read when `--config` is not given, if present
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "autoscaler_demo=debug,tower_http=debug";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub http: HttpServerConfig,
    /// Where the pod identifier comes from
    #[serde(default)]
    pub pod: PodConfig,
    /// Synthetic load sizes
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    #[serde(default = "HttpServerConfig::default_host")]
    pub host: String,
    #[serde(default = "HttpServerConfig::default_port")]
    pub port: u16,
    /// Graceful shutdown drain period in seconds
    #[serde(default = "HttpServerConfig::default_shutdown_grace")]
    pub shutdown_grace_seconds: u64,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: Self::default_host(),
            port: Self::default_port(),
            shutdown_grace_seconds: Self::default_shutdown_grace(),
        }
    }
}

impl HttpServerConfig {
    fn default_host() -> String {
        DEFAULT_HTTP_HOST.to_string()
    }

    fn default_port() -> u16 {
        DEFAULT_HTTP_PORT
    }

    fn default_shutdown_grace() -> u64 {
        DEFAULT_SHUTDOWN_GRACE_SECS
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PodConfig {
    /// Name of the environment variable read once at startup
    #[serde(default = "PodConfig::default_env_var")]
    pub env_var: String,
}

impl Default for PodConfig {
    fn default() -> Self {
        Self {
            env_var: Self::default_env_var(),
        }
    }
}

impl PodConfig {
    fn default_env_var() -> String {
        DEFAULT_POD_ENV_VAR.to_string()
    }

    /// Resolve the pod identifier from the environment, or "unknown" if unset.
    pub fn resolve(&self) -> String {
        std::env::var(&self.env_var).unwrap_or_else(|_| UNKNOWN_POD.to_string())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkloadConfig {
    /// SHA-256 rounds per `/load` request (default: 5,000,000)
    #[serde(default = "WorkloadConfig::default_load_iterations")]
    pub load_iterations: u64,
    /// Bytes allocated per `/memory` request (default: 100 MiB)
    #[serde(default = "WorkloadConfig::default_memory_bytes")]
    pub memory_bytes: usize,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            load_iterations: Self::default_load_iterations(),
            memory_bytes: Self::default_memory_bytes(),
        }
    }
}

impl WorkloadConfig {
    fn default_load_iterations() -> u64 {
        DEFAULT_LOAD_ITERATIONS
    }

    fn default_memory_bytes() -> usize {
        DEFAULT_MEMORY_BYTES
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
}

impl AppConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Load from `path` if given, otherwise from [`DEFAULT_CONFIG_PATH`] when
    /// it exists, otherwise fall back to built-in defaults.
    ///
    /// Returns the configuration and the file it was read from, if any.
    pub fn discover(path: Option<&Path>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = path {
            return Ok((Self::load(path)?, Some(path.to_path_buf())));
        }

        let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
        if default_path.is_file() {
            let config = Self::load(&default_path)?;
            Ok((config, Some(default_path)))
        } else {
            Ok((Self::default(), None))
        }
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        // A zero-round burn would report "0.00s" and defeat the endpoint
        if self.workload.load_iterations == 0 {
            return Err(ConfigError::Validation(
                "workload.load_iterations must be greater than zero".to_string(),
            ));
        }
        if self.workload.memory_bytes == 0 {
            return Err(ConfigError::Validation(
                "workload.memory_bytes must be greater than zero".to_string(),
            ));
        }
        if self.pod.env_var.is_empty() {
            return Err(ConfigError::Validation(
                "pod.env_var must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
