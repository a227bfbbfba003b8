//! Per-domain availability accounting.
//!
//! # Responsibilities
//! - Group probe results by domain, append-only
//! - Compute cumulative availability since process start
//!
//! # Design Decisions
//! - Up/total counters are kept alongside retained results, so an optional
//!   retention limit bounds memory without changing availability
//! - Only the control task mutates the aggregator, after the cycle barrier
//! - Domains with no recorded checks are absent from the output

use std::collections::{BTreeMap, VecDeque};

use crate::health::result::ProbeResult;

#[derive(Debug, Default)]
struct DomainHistory {
    results: VecDeque<ProbeResult>,
    up: u64,
    total: u64,
}

impl DomainHistory {
    fn push(&mut self, result: ProbeResult, limit: Option<usize>) {
        debug_assert_eq!(
            result.status_code() == 0,
            result.response_time_ms().is_infinite(),
            "status 0 must coincide with infinite latency"
        );

        self.total += 1;
        if result.is_up() {
            self.up += 1;
        }

        self.results.push_back(result);
        if let Some(limit) = limit {
            while self.results.len() > limit {
                self.results.pop_front();
            }
        }
    }

    /// Percentage rounded half to even, in integer arithmetic.
    fn percent(&self) -> u8 {
        let quotient = 100 * self.up / self.total;
        let twice_remainder = 2 * (100 * self.up % self.total);
        let rounded = if twice_remainder > self.total
            || (twice_remainder == self.total && quotient % 2 == 1)
        {
            quotient + 1
        } else {
            quotient
        };
        rounded as u8
    }
}

/// Accumulates probe results and reports availability per domain.
#[derive(Debug, Default)]
pub struct AvailabilityAggregator {
    domains: BTreeMap<String, DomainHistory>,
    history_limit: Option<usize>,
}

impl AvailabilityAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retain at most `limit` results per domain.
    pub fn with_history_limit(mut self, limit: Option<usize>) -> Self {
        self.history_limit = limit;
        self
    }

    /// Append results to their domain buckets.
    ///
    /// Returns the number of distinct domains touched.
    pub fn record(&mut self, results: impl IntoIterator<Item = ProbeResult>) -> usize {
        let mut touched = Vec::new();
        for result in results {
            let domain = result.domain().to_string();
            if !touched.contains(&domain) {
                touched.push(domain.clone());
            }
            self.domains
                .entry(domain)
                .or_default()
                .push(result, self.history_limit);
        }
        touched.len()
    }

    /// Cumulative availability for every domain with at least one check.
    pub fn availability(&self) -> BTreeMap<String, u8> {
        self.domains
            .iter()
            .filter(|(_, history)| history.total > 0)
            .map(|(domain, history)| (domain.clone(), history.percent()))
            .collect()
    }

    /// `(up, total)` checks recorded for a domain since start.
    pub fn checks(&self, domain: &str) -> Option<(u64, u64)> {
        self.domains.get(domain).map(|h| (h.up, h.total))
    }

    /// Retained results for a domain, oldest first.
    pub fn history(&self, domain: &str) -> Vec<&ProbeResult> {
        self.domains
            .get(domain)
            .map(|h| h.results.iter().collect())
            .unwrap_or_default()
    }

    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.domains.keys().map(String::as_str)
    }
}
