//! Negotiation counters

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for negotiation outcomes at the HTTP layer
#[derive(Debug, Default)]
pub struct Metrics {
    negotiated: AtomicU64,
    not_acceptable: AtomicU64,
    bad_requests: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn negotiated(&self) {
        self.negotiated.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "negotiated", "Metric incremented");
    }

    pub fn not_acceptable(&self) {
        self.not_acceptable.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "not_acceptable", "Metric incremented");
    }

    pub fn bad_request(&self) {
        self.bad_requests.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(counter = "bad_requests", "Metric incremented");
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            negotiated: self.negotiated.load(Ordering::Relaxed),
            not_acceptable: self.not_acceptable.load(Ordering::Relaxed),
            bad_requests: self.bad_requests.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricsSnapshot {
    pub negotiated: u64,
    pub not_acceptable: u64,
    pub bad_requests: u64,
}
