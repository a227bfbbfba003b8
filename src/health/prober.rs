//! Single-endpoint probing.
//!
//! # Responsibilities
//! - Issue exactly one request per call, bounded by the global timeout
//! - Measure time from dispatch to response headers
//! - Convert every failure into the DOWN sentinel result
//!
//! # Design Decisions
//! - The low-level send returns `Result`; nothing past `probe` sees an error
//! - Failure reasons are logged but not carried in `ProbeResult`
//! - The response body is never read

use std::time::{Duration, Instant};

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method};
use thiserror::Error;
use tokio::time;

use crate::config::ProbeConfig;
use crate::health::endpoint::EndpointDescriptor;
use crate::health::result::ProbeResult;
use crate::observability::metrics;

/// Why a probe obtained no response.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("timed out after {0:?}")]
    Timeout(Duration),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("invalid method '{0}'")]
    InvalidMethod(String),

    #[error("invalid header '{0}'")]
    InvalidHeader(String),
}

/// Executes probes against endpoints using a shared client.
///
/// Cloning is cheap; clones share the client's connection pool.
#[derive(Debug, Clone)]
pub struct Prober {
    client: Client,
    timeout: Duration,
}

impl Prober {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Build the shared client from probe settings.
    pub fn from_config(config: &ProbeConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(config.user_agent.clone()).build()?;
        Ok(Self::new(client, Duration::from_millis(config.timeout_ms)))
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe one endpoint. Never fails; errors become a DOWN result.
    pub async fn probe(&self, endpoint: &EndpointDescriptor) -> ProbeResult {
        let result = match self.send(endpoint).await {
            Ok((status, elapsed)) => {
                tracing::debug!(
                    endpoint = %endpoint.name(),
                    domain = %endpoint.domain(),
                    status,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Probe completed"
                );
                ProbeResult::responded(endpoint, status, elapsed)
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = %endpoint.name(),
                    domain = %endpoint.domain(),
                    error = %e,
                    "Probe failed"
                );
                ProbeResult::failed(endpoint)
            }
        };

        metrics::record_probe(&result);
        result
    }

    async fn send(&self, endpoint: &EndpointDescriptor) -> Result<(u16, Duration), ProbeError> {
        let method = Method::from_bytes(endpoint.method().as_bytes())
            .map_err(|_| ProbeError::InvalidMethod(endpoint.method().to_string()))?;

        let mut request = self
            .client
            .request(method, endpoint.url())
            .headers(build_headers(endpoint)?);
        if let Some(body) = endpoint.body() {
            request = request.body(body.to_string());
        }

        let started = Instant::now();
        let response = time::timeout(self.timeout, request.send())
            .await
            .map_err(|_| ProbeError::Timeout(self.timeout))??;
        let elapsed = started.elapsed();

        Ok((response.status().as_u16(), elapsed))
    }
}

fn build_headers(endpoint: &EndpointDescriptor) -> Result<HeaderMap, ProbeError> {
    let mut headers = HeaderMap::new();
    for (name, value) in endpoint.headers() {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ProbeError::InvalidHeader(name.clone()))?;
        let header_value =
            HeaderValue::from_str(value).map_err(|_| ProbeError::InvalidHeader(name.clone()))?;
        headers.insert(header_name, header_value);
    }

    if endpoint.body().is_some() && !headers.contains_key(CONTENT_TYPE) {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prober() -> Prober {
        Prober::new(Client::new(), Duration::from_millis(500))
    }

    #[tokio::test]
    async fn test_invalid_method_is_down() {
        let endpoint = EndpointDescriptor::new("bad", "http://127.0.0.1:1/").with_method("GE T");
        let result = prober().probe(&endpoint).await;
        assert_eq!(result.status_code(), 0);
        assert!(result.response_time_ms().is_infinite());
    }

    #[tokio::test]
    async fn test_unparseable_url_is_down() {
        let endpoint = EndpointDescriptor::new("bad", "not a url");
        let result = prober().probe(&endpoint).await;
        assert_eq!(result.status_code(), 0);
        assert_eq!(result.domain(), "not a url");
        assert!(!result.is_up());
    }

    #[tokio::test]
    async fn test_invalid_header_value_is_down() {
        let endpoint =
            EndpointDescriptor::new("bad", "http://127.0.0.1:1/").with_header("x-token", "a\nb");
        let result = prober().probe(&endpoint).await;
        assert_eq!(result.status_code(), 0);
    }

    #[test]
    fn test_body_defaults_content_type() {
        let endpoint = EndpointDescriptor::new("a", "http://example.com").with_body("{}");
        let headers = build_headers(&endpoint).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "application/json");

        let endpoint = endpoint.with_header("Content-Type", "text/plain");
        let headers = build_headers(&endpoint).unwrap();
        assert_eq!(headers[CONTENT_TYPE], "text/plain");
    }

    #[test]
    fn test_no_body_no_content_type() {
        let endpoint = EndpointDescriptor::new("a", "http://example.com");
        assert!(build_headers(&endpoint).unwrap().is_empty());
    }

    #[test]
    fn test_from_config_uses_timeout() {
        let config = ProbeConfig {
            timeout_ms: 1234,
            ..ProbeConfig::default()
        };
        let prober = Prober::from_config(&config).unwrap();
        assert_eq!(prober.timeout(), Duration::from_millis(1234));
    }
}
