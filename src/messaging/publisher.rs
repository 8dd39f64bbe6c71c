//! Downstream publication of finished insults.

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::aggregation::Insult;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("publish rejected: {0}")]
    Rejected(String),
}

/// Seam for the downstream messaging system.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, insult: &Insult) -> Result<(), PublishError>;
}

/// In-process publisher that records the event in the structured log.
pub struct LogPublisher;

#[async_trait]
impl EventPublisher for LogPublisher {
    async fn publish(&self, insult: &Insult) -> Result<(), PublishError> {
        tracing::info!(
            event_id = %Uuid::new_v4(),
            noun = %insult.noun,
            adj1 = %insult.adj1,
            adj2 = %insult.adj2,
            "insult published"
        );
        Ok(())
    }
}
