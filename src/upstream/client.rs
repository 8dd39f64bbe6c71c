//! HTTP client for the noun and adjective providers.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::aggregation::DependencyResult;
use crate::observability::metrics;
use crate::upstream::error::UpstreamError;

pub const NOUN_PATH: &str = "/api/v1/noun";
pub const ADJECTIVE_PATH: &str = "/api/v1/adjective";

#[derive(Debug, Deserialize)]
struct NounBody {
    noun: String,
}

#[derive(Debug, Deserialize)]
struct AdjectiveBody {
    adj: String,
}

/// Client for a single word dependency.
///
/// Issues the actual GET, enforces the transport timeout and classifies the
/// outcome. Fallback substitution is the breaker's job, not the client's.
pub struct UpstreamClient {
    dependency: &'static str,
    http: reqwest::Client,
    base: Url,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(dependency: &'static str, base: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            dependency,
            http,
            base,
            timeout,
        })
    }

    /// `GET /api/v1/noun`, tagged as a noun at the call site.
    pub async fn fetch_noun(&self) -> Result<DependencyResult, UpstreamError> {
        let body: NounBody = self.get_json(NOUN_PATH).await?;
        Ok(DependencyResult::Noun(body.noun))
    }

    /// `GET /api/v1/adjective`, tagged as an adjective at the call site.
    pub async fn fetch_adjective(&self) -> Result<DependencyResult, UpstreamError> {
        let body: AdjectiveBody = self.get_json(ADJECTIVE_PATH).await?;
        Ok(DependencyResult::Adjective(body.adj))
    }

    async fn get_json<B>(&self, path: &str) -> Result<B, UpstreamError>
    where
        B: serde::de::DeserializeOwned,
    {
        let result = self.request(path).await;
        if let Err(error) = &result {
            tracing::warn!(dependency = self.dependency, error = %error, "upstream call failed");
            metrics::record_upstream_failure(self.dependency);
        }
        result
    }

    async fn request<B>(&self, path: &str) -> Result<B, UpstreamError>
    where
        B: serde::de::DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| UpstreamError::Transport(e.to_string()))?;

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("unknown"),
                body,
            });
        }

        response
            .json::<B>()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))
    }

    fn classify(&self, error: reqwest::Error) -> UpstreamError {
        if error.is_timeout() {
            UpstreamError::Timeout(self.timeout)
        } else {
            UpstreamError::Transport(error.to_string())
        }
    }
}
