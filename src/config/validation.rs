//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check addresses parse and upstream URLs are absolute HTTP URLs
//! - Validate value ranges (timeouts and thresholds must be non-zero)
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::ServiceConfig;

#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    InvalidAddress { field: &'static str, value: String },
    InvalidUrl { dependency: &'static str, value: String, reason: String },
    UnsupportedScheme { dependency: &'static str, scheme: String },
    ZeroValue { field: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::InvalidAddress { field, value } => {
                write!(f, "{field}: '{value}' is not a valid socket address")
            }
            ValidationError::InvalidUrl { dependency, value, reason } => {
                write!(f, "{dependency} base_url '{value}' is invalid: {reason}")
            }
            ValidationError::UnsupportedScheme { dependency, scheme } => {
                write!(f, "{dependency} base_url must be http(s), got '{scheme}'")
            }
            ValidationError::ZeroValue { field } => {
                write!(f, "{field} must be greater than zero")
            }
        }
    }
}

/// Validate the whole config, collecting every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    check_url(&mut errors, "noun", &config.noun.base_url);
    check_url(&mut errors, "adjective", &config.adjective.base_url);

    check_non_zero(&mut errors, "breaker.max_failures", config.breaker.max_failures as u64);
    check_non_zero(&mut errors, "breaker.max_retries", config.breaker.max_retries as u64);
    check_non_zero(&mut errors, "breaker.timeout_ms", config.breaker.timeout_ms);
    check_non_zero(&mut errors, "breaker.reset_timeout_ms", config.breaker.reset_timeout_ms);
    check_non_zero(&mut errors, "client.request_timeout_ms", config.client.request_timeout_ms);
    check_non_zero(
        &mut errors,
        "listener.request_timeout_secs",
        config.listener.request_timeout_secs,
    );

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field,
            value: value.to_string(),
        });
    }
}

fn check_url(errors: &mut Vec<ValidationError>, dependency: &'static str, value: &str) {
    match url::Url::parse(value) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedScheme {
                    dependency,
                    scheme: url.scheme().to_string(),
                });
            }
        }
        Err(e) => errors.push(ValidationError::InvalidUrl {
            dependency,
            value: value.to_string(),
            reason: e.to_string(),
        }),
    }
}

fn check_non_zero(errors: &mut Vec<ValidationError>, field: &'static str, value: u64) {
    if value == 0 {
        errors.push(ValidationError::ZeroValue { field });
    }
}
