//! Delivery of serialized events to the tracking endpoint

use crate::constants::analytics::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, TRANSPORT_FAILURE_STATUS};
use crate::log::{Logger, LoggerExt};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;

/// Sends one serialized event; failures are absorbed by the implementation
#[async_trait]
pub trait Client: Send + Sync {
    async fn send(&self, body: String);
}

/// Client posting JSON bodies over HTTP
///
/// Any non-2xx response or transport failure produces a single debug record
/// on the injected logger. Requests are never retried.
pub struct HttpClient {
    client: reqwest::Client,
    endpoint: Url,
    logger: Arc<dyn Logger>,
}

impl HttpClient {
    /// Build a client for `endpoint`, which must be an absolute http(s) URL
    pub fn new(endpoint: &str, timeout: Duration, logger: Arc<dyn Logger>) -> Result<Self> {
        let endpoint = parse_endpoint(endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build analytics HTTP client")?;
        Ok(Self {
            client,
            endpoint,
            logger,
        })
    }

    /// Client for the default endpoint and timeout
    pub fn with_defaults(logger: Arc<dyn Logger>) -> Result<Self> {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_TIMEOUT, logger)
    }

    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    /// POST `body` and return the response status, `0` when there was none
    pub async fn post(&self, body: String) -> u16 {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await;

        match response {
            Ok(response) => response.status().as_u16(),
            Err(_) => TRANSPORT_FAILURE_STATUS,
        }
    }
}

#[async_trait]
impl Client for HttpClient {
    async fn send(&self, body: String) {
        let status = self.post(body).await;
        if !(200..300).contains(&status) {
            self.logger.debug(&format!(
                "Couldn't send analytics event, status code: {}",
                status
            ));
        }
    }
}

/// Validate a tracking endpoint
pub fn parse_endpoint(endpoint: &str) -> Result<Url> {
    let url = Url::parse(endpoint)
        .with_context(|| format!("Invalid analytics endpoint: '{}'", endpoint))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!(
            "Analytics endpoint must use http or https: '{}'",
            endpoint
        );
    }
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::ConsoleLogger;

    #[test]
    fn test_parse_endpoint() {
        assert!(parse_endpoint(DEFAULT_ENDPOINT).is_ok());
        assert!(parse_endpoint("http://localhost:8080/track").is_ok());
        assert!(parse_endpoint("/track").is_err());
        assert!(parse_endpoint("ftp://example.com/track").is_err());
        assert!(parse_endpoint("").is_err());
    }

    #[test]
    fn test_new_rejects_invalid_endpoint() {
        let logger = Arc::new(ConsoleLogger::new(std::io::sink()));
        let result = HttpClient::new("not a url", DEFAULT_TIMEOUT, logger);
        assert!(result.is_err());
        assert!(
            result
                .err()
                .unwrap()
                .to_string()
                .contains("Invalid analytics endpoint")
        );
    }

    #[test]
    fn test_with_defaults_endpoint() {
        let logger = Arc::new(ConsoleLogger::new(std::io::sink()));
        let client = HttpClient::with_defaults(logger).unwrap();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
    }
}
