//! Health check endpoint for container orchestration.
//!
//! Provides a liveness/readiness probe that returns 200 OK when the process is
//! running. It performs no work, so it keeps answering while `/load` holds a
//! blocking thread.

use axum::Json;
use serde::Serialize;

use crate::config::STATUS_HEALTHY;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: STATUS_HEALTHY,
    })
}
