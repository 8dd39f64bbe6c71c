//! Insult aggregation subsystem.
//!
//! # Data Flow
//! ```text
//! aggregate()
//!     → engine.rs spawns three breaker-wrapped calls (noun ×1, adjective ×2)
//!     → every call resolves (breaker contract), in no particular order
//!     → compose.rs merges the three tagged payloads into one Insult
//! ```
//!
//! # Design Decisions
//! - The two adjective calls share one breaker, so their failures share a counter
//! - Join waits for all three outcomes; completion order carries no meaning
//! - Dependency failure never fails the aggregate; sentinels stand in
//! - Only a task panic or a composition invariant breach surfaces as an error

pub mod compose;
pub mod engine;
pub mod types;

pub use compose::{compose, ComposeError};
pub use engine::{InsultService, ServiceInitError};
pub use types::{AggregateError, DependencyResult, Insult, FAILURE_SENTINEL, OPEN_SENTINEL};
