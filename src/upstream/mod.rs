//! Upstream dependency clients.
//!
//! # Data Flow
//! ```text
//! Breaker-permitted call
//!     → client.rs (HTTP GET with transport timeout)
//!     → classify outcome (status ≥ 400, connection error, decode error)
//!     → tag successful payload as noun or adjective at the call site
//!     → hand Result to the circuit breaker
//! ```
//!
//! # Design Decisions
//! - The client classifies failures; the breaker owns the fallback
//! - Payloads are tagged where the call is issued, never inferred afterwards
//! - Transport timeout (500ms default) is independent of the breaker timeout

pub mod client;
pub mod error;

pub use client::UpstreamClient;
pub use error::UpstreamError;
