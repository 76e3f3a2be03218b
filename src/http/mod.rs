//! HTTP server module.
//!
//! Serves plain HTTP/1.1 on the configured address. TLS is terminated in front
//! of the service by the cluster ingress, if at all.
//!
//! The server includes:
//! - Graceful shutdown on SIGTERM/SIGINT with a bounded drain period
//! - A `Handle` based entry point for binding to an ephemeral port in tests

mod server;
mod shutdown;

pub use server::{serve, start_server, ServerError};
