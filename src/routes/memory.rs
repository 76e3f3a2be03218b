//! Memory load handler.
//!
//! Allocates a fresh ballast buffer per request and holds it until the handler
//! returns. Nothing is pooled, so concurrent requests each add their own
//! allocation to the process footprint.

use axum::{extract::State, Extension, Json};
use serde::Serialize;
use tracing::instrument;

use crate::config::MEMORY_MESSAGE;
use crate::error::{AppErrorResponse, ResultExt};
use crate::middleware::RequestId;
use crate::state::AppState;
use crate::workload;

#[derive(Debug, Serialize)]
pub struct MemoryResponse {
    pub pod: String,
    pub memory_allocated: String,
    pub message: &'static str,
}

/// Allocates the configured ballast and reports its size.
#[instrument(name = "memory::memory_load", skip(state, request_id))]
pub async fn memory_load(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<MemoryResponse>, AppErrorResponse> {
    let bytes = state.config.workload.memory_bytes;

    // Filling 100 MiB takes long enough to stall a runtime worker
    let ballast = tokio::task::spawn_blocking(move || workload::allocate_ballast(bytes))
        .await
        .with_request_id(&request_id)?
        .with_request_id(&request_id)?;
    tracing::debug!(bytes = ballast.len(), "Allocated memory ballast");

    let response = MemoryResponse {
        pod: state.pod.to_string(),
        memory_allocated: workload::ballast_label(ballast.len()),
        message: MEMORY_MESSAGE,
    };

    drop(ballast);
    Ok(Json(response))
}
