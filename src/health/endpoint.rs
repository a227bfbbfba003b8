//! Monitored endpoint descriptor.

use std::collections::BTreeMap;

use url::Url;

use crate::config::EndpointConfig;

/// An immutable description of one monitored target.
///
/// The aggregation domain is derived from the URL once, at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointDescriptor {
    name: String,
    url: String,
    method: String,
    headers: BTreeMap<String, String>,
    body: Option<String>,
    domain: String,
}

impl EndpointDescriptor {
    /// Create a GET endpoint with no headers and no body.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let domain = derive_domain(&url);
        Self {
            name: name.into(),
            url,
            method: "GET".to_string(),
            headers: BTreeMap::new(),
            body: None,
            domain,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Host plus non-default port, e.g. `api.example.com:8080`.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl From<&EndpointConfig> for EndpointDescriptor {
    fn from(config: &EndpointConfig) -> Self {
        let mut endpoint = EndpointDescriptor::new(config.name.clone(), config.url.clone())
            .with_method(config.method.clone());
        endpoint.headers = config.headers.clone();
        endpoint.body = config.body.clone();
        endpoint
    }
}

/// Derive the aggregation key from a URL.
///
/// `Url::port` is `None` for the scheme's default port, so `:443` on https
/// and `:80` on http are dropped. Unparseable or host-less URLs fall back to
/// the raw text.
fn derive_domain(raw: &str) -> String {
    match Url::parse(raw) {
        Ok(url) => match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => raw.to_string(),
        },
        Err(_) => raw.to_string(),
    }
}
