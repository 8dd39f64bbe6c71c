//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Call to upstream dependency:
//!     → circuit_breaker.rs (permit, short-circuit, or half-open trial)
//!     → wrapped operation runs under the breaker's call timeout
//!     → outcome recorded (consecutive failures open the circuit)
//!     → on any failure the registered fallback produces the result
//! ```
//!
//! # Design Decisions
//! - Per-dependency circuit breaker (not global)
//! - Fail fast in Open state; the wrapped operation is never invoked
//! - A breaker call never surfaces an error; the fallback payload stands in
//! - Bounded trial budget in Half-Open (prevents hammering a recovering dependency)

pub mod circuit_breaker;

pub use circuit_breaker::{BreakerConfig, BreakerState, CircuitBreaker};
