//! Status handler for the service root.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::config::{APP_MESSAGE, STATUS_RUNNING};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: &'static str,
    pub pod: String,
    pub status: &'static str,
}

/// Reports that the service is running and which pod answered.
pub async fn index(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        message: APP_MESSAGE,
        pod: state.pod.to_string(),
        status: STATUS_RUNNING,
    })
}
