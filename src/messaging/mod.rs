//! Messaging subsystem.
//!
//! # Design Decisions
//! - Publishing is fire-and-forget: never on the aggregation critical path
//! - Publish failure is reported to the publish caller and nowhere else
//! - The concrete transport lives behind the `EventPublisher` trait; this
//!   crate ships only the tracing-backed implementation

pub mod publisher;

pub use publisher::{EventPublisher, LogPublisher, PublishError};
