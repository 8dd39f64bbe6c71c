//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; filter from config or RUST_LOG
//! - Prometheus exposition is optional and off the request path
//! - Metric updates are fire-and-forget counter/gauge writes

pub mod logging;
pub mod metrics;
