//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, and
//! every section defaults so a minimal (or absent) config still runs.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::resilience::BreakerConfig;

/// Root configuration for the insult service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address, request deadline).
    pub listener: ListenerConfig,

    /// Noun provider endpoint.
    pub noun: UpstreamConfig,

    /// Adjective provider endpoint.
    pub adjective: UpstreamConfig,

    /// Circuit breaker tuning, shared by both dependencies.
    pub breaker: BreakerSettings,

    /// Upstream HTTP client settings.
    pub client: ClientConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            noun: UpstreamConfig {
                base_url: "http://localhost:8081".to_string(),
            },
            adjective: UpstreamConfig {
                base_url: "http://localhost:8082".to_string(),
            },
            breaker: BreakerSettings::default(),
            client: ClientConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Deadline for serving one request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// One upstream word dependency.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the dependency (e.g., "http://localhost:8081").
    pub base_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8081".to_string(),
        }
    }
}

impl UpstreamConfig {
    pub fn url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.base_url)
    }
}

/// Circuit breaker tuning.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BreakerSettings {
    /// Consecutive failures before a circuit opens.
    pub max_failures: u32,

    /// Trial calls allowed while half-open.
    pub max_retries: u32,

    /// Per-call deadline inside the breaker, in milliseconds.
    pub timeout_ms: u64,

    /// Time an open circuit waits before allowing trials, in milliseconds.
    pub reset_timeout_ms: u64,
}

impl Default for BreakerSettings {
    fn default() -> Self {
        Self {
            max_failures: 3,
            max_retries: 3,
            timeout_ms: 250,
            reset_timeout_ms: 15_000,
        }
    }
}

impl From<&BreakerSettings> for BreakerConfig {
    fn from(settings: &BreakerSettings) -> Self {
        Self {
            max_failures: settings.max_failures,
            max_retries: settings.max_retries,
            timeout: std::time::Duration::from_millis(settings.timeout_ms),
            reset_timeout: std::time::Duration::from_millis(settings.reset_timeout_ms),
        }
    }
}

/// Upstream HTTP client settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Transport-level deadline per upstream request, in milliseconds.
    /// Independent of the breaker's own timeout.
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 500,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when RUST_LOG is unset.
    pub log_filter: String,

    /// Enable the Prometheus scrape endpoint.
    pub metrics_enabled: bool,

    /// Address for the scrape endpoint.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "insult_service=debug,tower_http=debug".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
