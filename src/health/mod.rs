//! Health reporting subsystem.
//!
//! # Data Flow
//! ```text
//! check()
//!     → read noun breaker state (in-memory, no network)
//!     → read adjective breaker state
//!     → derive aggregate verdict from the two states
//! ```
//!
//! # Design Decisions
//! - Pure reads: checking health never mutates breaker state
//! - Safe to call concurrently with in-flight aggregations
//! - Verdict polarity matches the legacy endpoint (see reporter.rs)

pub mod reporter;

pub use reporter::{HealthReport, HealthReporter, HealthVerdict};
