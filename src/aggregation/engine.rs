//! Fan-out/fan-in aggregation engine.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::task::JoinHandle;

use crate::aggregation::compose::compose;
use crate::aggregation::types::{
    AggregateError, DependencyResult, Insult, FAILURE_SENTINEL, OPEN_SENTINEL,
};
use crate::config::schema::ServiceConfig;
use crate::messaging::EventPublisher;
use crate::observability::metrics;
use crate::resilience::{BreakerConfig, CircuitBreaker};
use crate::upstream::UpstreamClient;

/// Wiring failure at service construction. Distinct from anything that can
/// happen while aggregating.
#[derive(Debug, Error)]
pub enum ServiceInitError {
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// The request aggregator.
///
/// Holds one long-lived breaker per dependency (the two adjective calls share
/// the adjective breaker, and therefore its failure counter) and fans three
/// calls out per aggregation. Created once at startup and shared process-wide.
pub struct InsultService {
    noun_breaker: Arc<CircuitBreaker<DependencyResult>>,
    adj_breaker: Arc<CircuitBreaker<DependencyResult>>,
    noun_client: Arc<UpstreamClient>,
    adj_client: Arc<UpstreamClient>,
    publisher: Arc<dyn EventPublisher>,
}

impl InsultService {
    pub fn from_config(
        config: &ServiceConfig,
        publisher: Arc<dyn EventPublisher>,
    ) -> Result<Self, ServiceInitError> {
        let breaker_config = BreakerConfig::from(&config.breaker);
        let transport_timeout = Duration::from_millis(config.client.request_timeout_ms);

        let noun_breaker = Arc::new(
            CircuitBreaker::new("noun-breaker", breaker_config.clone(), || {
                DependencyResult::Noun(FAILURE_SENTINEL.to_string())
            })
            .with_open_handler(|| DependencyResult::Noun(OPEN_SENTINEL.to_string())),
        );
        let adj_breaker = Arc::new(
            CircuitBreaker::new("adj-breaker", breaker_config, || {
                DependencyResult::Adjective(FAILURE_SENTINEL.to_string())
            })
            .with_open_handler(|| DependencyResult::Adjective(OPEN_SENTINEL.to_string())),
        );

        let noun_client = Arc::new(UpstreamClient::new(
            "noun",
            config.noun.url()?,
            transport_timeout,
        )?);
        let adj_client = Arc::new(UpstreamClient::new(
            "adjective",
            config.adjective.url()?,
            transport_timeout,
        )?);

        Ok(Self {
            noun_breaker,
            adj_breaker,
            noun_client,
            adj_client,
            publisher,
        })
    }

    /// Fan out one noun call and two adjective calls, join on all three,
    /// compose. Dependency failure can never fail this: a breaker-wrapped
    /// call always resolves, so `Err` only means a task panicked or the
    /// composed results broke the wiring invariant.
    pub async fn aggregate(&self) -> Result<Insult, AggregateError> {
        metrics::record_aggregate_request();

        let (noun, adj_a, adj_b) =
            tokio::join!(self.spawn_noun(), self.spawn_adjective(), self.spawn_adjective());

        let results = [
            noun.map_err(|e| AggregateError::Task(e.to_string()))?,
            adj_a.map_err(|e| AggregateError::Task(e.to_string()))?,
            adj_b.map_err(|e| AggregateError::Task(e.to_string()))?,
        ];

        let insult = compose(results)?;
        tracing::debug!(
            noun = %insult.noun,
            adj1 = %insult.adj1,
            adj2 = %insult.adj2,
            "aggregation complete"
        );
        Ok(insult)
    }

    /// Hand a finished insult to the publisher off the critical path.
    /// Publish failure is logged and goes no further.
    pub fn publish(&self, insult: Insult) {
        let publisher = Arc::clone(&self.publisher);
        tokio::spawn(async move {
            if let Err(error) = publisher.publish(&insult).await {
                tracing::warn!(error = %error, "failed to publish insult");
            }
        });
    }

    pub fn noun_breaker(&self) -> Arc<CircuitBreaker<DependencyResult>> {
        Arc::clone(&self.noun_breaker)
    }

    pub fn adj_breaker(&self) -> Arc<CircuitBreaker<DependencyResult>> {
        Arc::clone(&self.adj_breaker)
    }

    fn spawn_noun(&self) -> JoinHandle<DependencyResult> {
        let breaker = Arc::clone(&self.noun_breaker);
        let client = Arc::clone(&self.noun_client);
        tokio::spawn(async move { breaker.execute(|| async move { client.fetch_noun().await }).await })
    }

    fn spawn_adjective(&self) -> JoinHandle<DependencyResult> {
        let breaker = Arc::clone(&self.adj_breaker);
        let client = Arc::clone(&self.adj_client);
        tokio::spawn(
            async move { breaker.execute(|| async move { client.fetch_adjective().await }).await },
        )
    }
}
