//! Upstream call metrics collection.

use metrics::{counter, histogram};
use std::time::Instant;

/// Record the duration of one upstream call.
pub fn record_call_duration(endpoint: &str, duration_secs: f64) {
    histogram!(
        "upstream_call_duration_seconds",
        "endpoint" => endpoint.to_string()
    )
    .record(duration_secs);
}

/// Record an upstream call failure.
pub fn record_call_failure(endpoint: &str) {
    counter!(
        "upstream_call_failures_total",
        "endpoint" => endpoint.to_string()
    )
    .increment(1);
}

/// A helper to time upstream calls and record metrics.
///
/// Usage:
/// ```ignore
/// let timer = CallTimer::new("permissions_by_role");
/// let result = backend.permissions_by_role(role_id).await;
/// timer.record(result.is_err());
/// ```
pub struct CallTimer {
    endpoint: String,
    start: Instant,
}

impl CallTimer {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            start: Instant::now(),
        }
    }

    /// Record the elapsed duration, and a failure when `failed` is set.
    pub fn record(self, failed: bool) {
        let duration = self.start.elapsed().as_secs_f64();
        record_call_duration(&self.endpoint, duration);
        if failed {
            record_call_failure(&self.endpoint);
        }
    }
}
