//! Shared application state for request handlers.

use std::sync::Arc;

use crate::config::AppConfig;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Built once at startup. Contains the application configuration and the pod
/// identifier resolved from the environment, so handlers never read process
/// state themselves.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pod: Arc<str>,
}

impl AppState {
    /// Creates application state, resolving the pod identifier from the environment.
    pub fn new(config: AppConfig) -> Self {
        let pod = config.pod.resolve();
        Self::with_pod(config, pod)
    }

    /// Creates application state with an explicit pod identifier.
    pub fn with_pod(config: AppConfig, pod: impl Into<Arc<str>>) -> Self {
        Self {
            config: Arc::new(config),
            pod: pod.into(),
        }
    }
}
