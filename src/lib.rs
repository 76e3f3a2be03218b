//! autoscaler-demo: a synthetic load generator for autoscaler testing.
//!
//! Exposes a status route, a health probe, and two routes that burn CPU or
//! hold memory on demand so that a cluster autoscaler has something to react to.

pub mod config;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod workload;

pub use config::AppConfig;
pub use routes::create_router;
pub use state::AppState;
