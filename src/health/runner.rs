//! Concurrent fan-out of one cycle's probes.

use futures_util::future::join_all;
use futures_util::stream::{self, StreamExt};

use crate::health::endpoint::EndpointDescriptor;
use crate::health::prober::Prober;
use crate::health::result::ProbeResult;

/// Runs every endpoint's probe concurrently and waits for all of them.
#[derive(Debug, Clone)]
pub struct CheckRunner {
    prober: Prober,
    max_concurrency: Option<usize>,
}

impl CheckRunner {
    /// Unbounded fan-out: one in-flight probe per endpoint.
    pub fn new(prober: Prober) -> Self {
        Self {
            prober,
            max_concurrency: None,
        }
    }

    /// Cap the number of probes in flight at once.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.filter(|&n| n > 0);
        self
    }

    pub fn prober(&self) -> &Prober {
        &self.prober
    }

    /// Probe all endpoints, returning only once every probe has resolved.
    ///
    /// Results are in no particular order.
    pub async fn run(&self, endpoints: &[EndpointDescriptor]) -> Vec<ProbeResult> {
        if endpoints.is_empty() {
            return Vec::new();
        }

        match self.max_concurrency {
            None => join_all(endpoints.iter().map(|endpoint| self.prober.probe(endpoint))).await,
            Some(limit) => {
                let probes: Vec<_> = endpoints
                    .iter()
                    .map(|endpoint| self.prober.probe(endpoint))
                    .collect();
                stream::iter(probes).buffer_unordered(limit).collect().await
            }
        }
    }
}
