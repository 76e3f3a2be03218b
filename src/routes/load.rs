//! CPU load handler.
//!
//! Hashes integers for a fixed number of rounds so that an autoscaler watching
//! CPU utilization sees sustained pressure. The burn occupies one blocking-pool
//! thread until it finishes; there is no cancellation.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::instrument;

use crate::config::LOAD_MESSAGE;
use crate::error::{AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::state::AppState;
use crate::workload;

#[derive(Debug, Serialize)]
pub struct LoadResponse {
    pub pod: String,
    pub computation_time: String,
    pub message: &'static str,
}

/// Runs the CPU burn and reports how long it took.
#[instrument(name = "load::cpu_load", skip(state, request_id))]
pub async fn cpu_load(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<LoadResponse>, AppErrorResponse> {
    let iterations = state.config.workload.load_iterations;
    tracing::debug!(iterations, "Starting CPU burn");

    let burn = tokio::task::spawn_blocking(move || workload::burn_cpu(iterations))
        .await
        .with_request_id(&request_id)?;

    let computation_time = burn.computation_time();
    tracing::info!(
        iterations,
        elapsed_ms = burn.elapsed.as_millis() as u64,
        "CPU burn completed"
    );

    Ok(Json(LoadResponse {
        pod: state.pod.to_string(),
        computation_time,
        message: LOAD_MESSAGE,
    }))
}
