//! Upstream failure classification.

use std::time::Duration;

use thiserror::Error;

/// Everything that can go wrong talking to a word dependency.
///
/// None of these escape the circuit breaker: each one is converted into a
/// fallback payload before the aggregation layer sees it.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection-level failure (refused, reset, DNS, bad URL).
    #[error("transport error: {0}")]
    Transport(String),

    /// Non-2xx HTTP response, with the upstream's own words preserved.
    #[error("{status}: {reason}\n{body}")]
    Status {
        status: u16,
        reason: &'static str,
        body: String,
    },

    /// The transport call outlived its timeout budget.
    #[error("request exceeded {}ms transport budget", .0.as_millis())]
    Timeout(Duration),

    /// The response body was not the expected word payload.
    #[error("invalid payload: {0}")]
    Decode(String),
}
