//! Breaker-state-derived health reports.

use std::sync::Arc;

use serde::Serialize;

use crate::aggregation::DependencyResult;
use crate::resilience::{BreakerState, CircuitBreaker};

/// Aggregate verdict over the two breakers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HealthVerdict {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "DEGRADED")]
    Degraded,
}

/// Snapshot of both breaker states plus the derived verdict.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub noun: BreakerState,
    pub adj: BreakerState,
    pub status: HealthVerdict,
}

impl HealthReport {
    /// Whether both circuits are fully closed. Drives the HTTP status of the
    /// health endpoint, independently of the `status` field.
    pub fn all_closed(&self) -> bool {
        self.noun == BreakerState::Closed && self.adj == BreakerState::Closed
    }
}

/// Reads breaker state and derives the aggregate verdict. Never touches the
/// network and never mutates anything.
pub struct HealthReporter {
    noun_breaker: Arc<CircuitBreaker<DependencyResult>>,
    adj_breaker: Arc<CircuitBreaker<DependencyResult>>,
}

impl HealthReporter {
    pub fn new(
        noun_breaker: Arc<CircuitBreaker<DependencyResult>>,
        adj_breaker: Arc<CircuitBreaker<DependencyResult>>,
    ) -> Self {
        Self {
            noun_breaker,
            adj_breaker,
        }
    }

    pub async fn check(&self) -> HealthReport {
        let noun = self.noun_breaker.state().await;
        let adj = self.adj_breaker.state().await;

        // Legacy polarity, kept verbatim for existing consumers of this
        // endpoint: the verdict reads OK while a circuit is open and
        // DEGRADED while both circuits are closed or half-open.
        let status = if noun == BreakerState::Open || adj == BreakerState::Open {
            HealthVerdict::Ok
        } else {
            HealthVerdict::Degraded
        };

        HealthReport { noun, adj, status }
    }
}
