//! Configuration validation
//!
//! All rule violations are collected before reporting, so a broken file is
//! fixed in one pass.

use super::Config;
use crate::analytics::client::parse_endpoint;
use anyhow::anyhow;

/// Enumeration of possible validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Analytics endpoint is not an absolute http(s) URL
    InvalidEndpoint(String),
    /// Analytics worker pool has no workers
    EmptyWorkerPool,
    /// Analytics queue cannot hold any event
    EmptyQueue,
    /// Analytics request timeout is zero
    ZeroTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidEndpoint(endpoint) => {
                write!(f, "Invalid analytics endpoint: '{}'", endpoint)
            }
            ValidationError::EmptyWorkerPool => {
                write!(f, "Analytics pool_size must be at least 1")
            }
            ValidationError::EmptyQueue => {
                write!(f, "Analytics queue_size must be at least 1")
            }
            ValidationError::ZeroTimeout => {
                write!(f, "Analytics timeout_secs must be at least 1")
            }
        }
    }
}

/// Validates a complete configuration object
pub fn validate_config(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let analytics = &config.analytics;

    if parse_endpoint(&analytics.endpoint).is_err() {
        errors.push(ValidationError::InvalidEndpoint(analytics.endpoint.clone()));
    }
    if analytics.pool_size == 0 {
        errors.push(ValidationError::EmptyWorkerPool);
    }
    if analytics.queue_size == 0 {
        errors.push(ValidationError::EmptyQueue);
    }
    if analytics.timeout_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Fold validation errors into a single error
pub fn validation_errors_to_anyhow(errors: Vec<ValidationError>) -> anyhow::Error {
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    anyhow!("Configuration validation failed:\n  - {}", messages.join("\n  - "))
}
