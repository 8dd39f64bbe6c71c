//! Circuit breaker for upstream dependency protection.
//!
//! # States
//! - Closed: normal operation, calls pass through
//! - Open: dependency assumed down, calls short-circuit to the fallback
//! - Half-Open: limited trial calls test whether the dependency recovered
//!
//! # State Transitions
//! ```text
//! Closed → Open: max_failures consecutive failures
//! Open → Half-Open: after reset_timeout
//! Half-Open → Closed: trial call succeeds
//! Half-Open → Open: trial call fails (reset timer restarts)
//! ```
//!
//! A breaker call never returns an error. Operation failures, call timeouts
//! and short-circuits all substitute the registered fallback payload, so the
//! caller only sees the payload distinguish a real result from a degraded one.

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::observability::metrics;

/// Observable state of a circuit breaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BreakerState {
    #[serde(rename = "CLOSED")]
    Closed,
    #[serde(rename = "OPEN")]
    Open,
    #[serde(rename = "HALF_OPEN")]
    HalfOpen,
}

impl BreakerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            BreakerState::Closed => "CLOSED",
            BreakerState::Open => "OPEN",
            BreakerState::HalfOpen => "HALF_OPEN",
        }
    }
}

impl fmt::Display for BreakerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breaker tuning, immutable for the breaker's lifetime.
#[derive(Debug, Clone)]
pub struct BreakerConfig {
    /// Consecutive failures before the circuit opens.
    pub max_failures: u32,

    /// Trial calls allowed through while Half-Open.
    pub max_retries: u32,

    /// Deadline for each call passed through the breaker.
    pub timeout: Duration,

    /// Time spent Open before trial calls are allowed again.
    pub reset_timeout: Duration,
}

impl Default for BreakerConfig {
    fn default() -> Self {
        Self {
            max_failures: 3,
            max_retries: 3,
            timeout: Duration::from_millis(250),
            reset_timeout: Duration::from_millis(15_000),
        }
    }
}

struct Inner {
    state: BreakerState,
    failure_count: u32,
    half_open_trials: u32,
    opened_at: Option<Instant>,
}

impl Inner {
    fn closed() -> Self {
        Self {
            state: BreakerState::Closed,
            failure_count: 0,
            half_open_trials: 0,
            opened_at: None,
        }
    }
}

enum Permit {
    Call,
    ShortCircuit,
}

type Producer<T> = Box<dyn Fn() -> T + Send + Sync>;

/// Circuit breaker wrapping a single asynchronous operation kind.
///
/// One instance guards one dependency for the lifetime of the process. State
/// transitions are serialized behind a mutex, so concurrent `execute` calls
/// sharing a breaker cannot race the failure counter.
pub struct CircuitBreaker<T> {
    name: &'static str,
    config: BreakerConfig,
    fallback: Producer<T>,
    open_handler: Option<Producer<T>>,
    inner: Mutex<Inner>,
}

impl<T> CircuitBreaker<T> {
    /// Create a breaker in the Closed state with the general fallback producer.
    pub fn new(
        name: &'static str,
        config: BreakerConfig,
        fallback: impl Fn() -> T + Send + Sync + 'static,
    ) -> Self {
        Self {
            name,
            config,
            fallback: Box::new(fallback),
            open_handler: None,
            inner: Mutex::new(Inner::closed()),
        }
    }

    /// Register a dedicated producer for the short-circuit (Open) case.
    /// Without one, the general fallback covers short-circuits too.
    pub fn with_open_handler(mut self, handler: impl Fn() -> T + Send + Sync + 'static) -> Self {
        self.open_handler = Some(Box::new(handler));
        self
    }

    /// Force the breaker Closed and clear all counters.
    pub async fn reset(&self) {
        let mut inner = self.inner.lock().await;
        *inner = Inner::closed();
        metrics::record_breaker_state(self.name, BreakerState::Closed);
    }

    /// Current effective state. Pure read: the elapsed reset timeout is
    /// accounted for without mutating anything.
    pub async fn state(&self) -> BreakerState {
        let inner = self.inner.lock().await;
        match (inner.state, inner.opened_at) {
            (BreakerState::Open, Some(opened_at))
                if opened_at.elapsed() >= self.config.reset_timeout =>
            {
                BreakerState::HalfOpen
            }
            (state, _) => state,
        }
    }

    /// Run `op` under the breaker. Never fails: operation errors, timeouts
    /// and short-circuits all resolve to the fallback payload.
    pub async fn execute<F, Fut, E>(&self, op: F) -> T
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        match self.acquire().await {
            Permit::ShortCircuit => {
                tracing::debug!(breaker = self.name, "short-circuiting call");
                return self.open_handler.as_ref().unwrap_or(&self.fallback)();
            }
            Permit::Call => {}
        }

        match tokio::time::timeout(self.config.timeout, op()).await {
            Ok(Ok(value)) => {
                self.record_success().await;
                value
            }
            Ok(Err(error)) => {
                tracing::warn!(breaker = self.name, error = %error, "wrapped call failed");
                self.record_failure().await;
                (self.fallback)()
            }
            Err(_) => {
                tracing::warn!(
                    breaker = self.name,
                    timeout_ms = self.config.timeout.as_millis() as u64,
                    "wrapped call exceeded breaker timeout"
                );
                self.record_failure().await;
                (self.fallback)()
            }
        }
    }

    /// Decide whether a call may pass through, applying the Open → Half-Open
    /// transition once the reset timeout has elapsed.
    async fn acquire(&self) -> Permit {
        let mut inner = self.inner.lock().await;

        if inner.state == BreakerState::Open {
            let reset_elapsed = inner
                .opened_at
                .map(|at| at.elapsed() >= self.config.reset_timeout)
                .unwrap_or(false);
            if reset_elapsed {
                inner.state = BreakerState::HalfOpen;
                inner.half_open_trials = 0;
                tracing::info!(breaker = self.name, "entering half-open, allowing trial calls");
                metrics::record_breaker_state(self.name, BreakerState::HalfOpen);
            }
        }

        match inner.state {
            BreakerState::Closed => Permit::Call,
            BreakerState::Open => Permit::ShortCircuit,
            BreakerState::HalfOpen => {
                if inner.half_open_trials < self.config.max_retries {
                    inner.half_open_trials += 1;
                    Permit::Call
                } else {
                    Permit::ShortCircuit
                }
            }
        }
    }

    async fn record_success(&self) {
        let mut inner = self.inner.lock().await;
        match inner.state {
            BreakerState::HalfOpen => {
                *inner = Inner::closed();
                tracing::info!(breaker = self.name, "trial call succeeded, circuit closed");
                metrics::record_breaker_state(self.name, BreakerState::Closed);
            }
            // Failures must be consecutive to open the circuit.
            BreakerState::Closed => inner.failure_count = 0,
            BreakerState::Open => {}
        }
    }

    async fn record_failure(&self) {
        let mut inner = self.inner.lock().await;
        match inner.state {
            BreakerState::HalfOpen => {
                inner.state = BreakerState::Open;
                inner.opened_at = Some(Instant::now());
                tracing::warn!(breaker = self.name, "trial call failed, circuit re-opened");
                metrics::record_breaker_state(self.name, BreakerState::Open);
            }
            BreakerState::Closed => {
                inner.failure_count += 1;
                if inner.failure_count >= self.config.max_failures {
                    inner.state = BreakerState::Open;
                    inner.failure_count = 0;
                    inner.opened_at = Some(Instant::now());
                    tracing::warn!(
                        breaker = self.name,
                        max_failures = self.config.max_failures,
                        "failure threshold reached, circuit opened"
                    );
                    metrics::record_breaker_state(self.name, BreakerState::Open);
                }
            }
            // A call permitted before the circuit opened may still complete;
            // its late failure carries no new information.
            BreakerState::Open => {}
        }
    }
}
