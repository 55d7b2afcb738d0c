//! Request counters for the PokeAPI client.
//!
//! Cloning a `Metrics` shares the underlying counters, so the sync client and
//! its async wrapper report into the same totals.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Counters {
    http_requests: AtomicU64,
    http_errors: AtomicU64,
    http_duration_ms: AtomicU64,
    entries_listed: AtomicU64,
    details_fetched: AtomicU64,
    sprite_bytes: AtomicU64,
}

/// Metrics collector for PokeAPI traffic.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    counters: Arc<Counters>,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished HTTP request.
    pub fn record_http_request(&self, duration: Duration) {
        self.counters.http_requests.fetch_add(1, Ordering::Relaxed);
        self.counters
            .http_duration_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_http_error(&self) {
        self.counters.http_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the number of raw entries a page returned.
    pub fn record_entries_listed(&self, count: usize) {
        self.counters
            .entries_listed
            .fetch_add(count as u64, Ordering::Relaxed);
    }

    pub fn record_detail_fetched(&self) {
        self.counters.details_fetched.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_sprite_bytes(&self, len: usize) {
        self.counters
            .sprite_bytes
            .fetch_add(len as u64, Ordering::Relaxed);
    }

    /// Snapshot of all counters.
    pub fn summary(&self) -> MetricsSummary {
        let http_requests_total = self.counters.http_requests.load(Ordering::Relaxed);
        let http_duration_total_ms = self.counters.http_duration_ms.load(Ordering::Relaxed);
        let http_duration_avg_ms = if http_requests_total == 0 {
            0.0
        } else {
            http_duration_total_ms as f64 / http_requests_total as f64
        };

        MetricsSummary {
            http_requests_total,
            http_errors_total: self.counters.http_errors.load(Ordering::Relaxed),
            http_duration_total_ms,
            http_duration_avg_ms,
            entries_listed_total: self.counters.entries_listed.load(Ordering::Relaxed),
            details_fetched_total: self.counters.details_fetched.load(Ordering::Relaxed),
            sprite_bytes_total: self.counters.sprite_bytes.load(Ordering::Relaxed),
        }
    }
}

/// A snapshot of metrics values.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsSummary {
    pub http_requests_total: u64,
    pub http_errors_total: u64,
    pub http_duration_total_ms: u64,
    pub http_duration_avg_ms: f64,
    pub entries_listed_total: u64,
    pub details_fetched_total: u64,
    pub sprite_bytes_total: u64,
}

/// Times one HTTP request and records it on completion.
pub struct HttpTimer {
    start: Instant,
    metrics: Metrics,
}

impl HttpTimer {
    pub fn start(metrics: &Metrics) -> Self {
        Self {
            start: Instant::now(),
            metrics: metrics.clone(),
        }
    }

    /// Record the request, counting it as an error when `failed`.
    pub fn finish(self, failed: bool) -> Duration {
        let duration = self.start.elapsed();
        self.metrics.record_http_request(duration);
        if failed {
            self.metrics.record_http_error();
        }
        duration
    }
}
