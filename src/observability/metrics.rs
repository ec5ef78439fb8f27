//! Metrics collection.
//!
//! # Metrics
//! - `gateway_calls_total` (counter): calls by method, outcome
//! - `gateway_call_duration_seconds` (histogram): latency distribution
//! - `gateway_slow_calls_total` (counter): calls over the slow-call threshold
//!
//! # Design Decisions
//! - Recorder is installed by the embedding application, not here
//! - Outcome label is the status code, "transport" when the call was sent but no
//!   response arrived, or "invalid_request" when it was never sent

use std::time::Duration;

/// Record one settled gateway call.
pub fn record_call(method: &'static str, outcome: String, elapsed: Duration) {
    ::metrics::counter!("gateway_calls_total", "method" => method, "outcome" => outcome).increment(1);
    ::metrics::histogram!("gateway_call_duration_seconds", "method" => method)
        .record(elapsed.as_secs_f64());
}

/// Record a call that exceeded the slow-call threshold.
pub fn record_slow_call(method: &'static str) {
    ::metrics::counter!("gateway_slow_calls_total", "method" => method).increment(1);
}
