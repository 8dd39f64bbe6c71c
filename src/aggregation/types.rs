//! Aggregation data model.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aggregation::compose::ComposeError;

/// Substituted by the general breaker fallback.
pub const FAILURE_SENTINEL: &str = "[failure]";

/// Substituted when a breaker short-circuits in the Open state.
pub const OPEN_SENTINEL: &str = "[open]";

/// One upstream outcome, tagged by the invoker at the call site so the
/// composer never has to guess which call produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyResult {
    Noun(String),
    Adjective(String),
}

/// The composed aggregate, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insult {
    pub noun: String,
    pub adj1: String,
    pub adj2: String,
}

/// The only failures an aggregation caller can observe. Dependency-level
/// failures never reach here; they become sentinel payloads instead.
#[derive(Debug, Error)]
pub enum AggregateError {
    /// A spawned dependency task failed outside the breaker contract
    /// (panic or cancellation), i.e. a programming error.
    #[error("aggregation task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Compose(#[from] ComposeError),
}
