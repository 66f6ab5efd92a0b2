//! Metrics collection.
//!
//! # Metrics
//! - `tipjar_node_requests_total` (counter): node reads/writes by outcome
//! - `tipjar_announces_total` (counter): announce attempts by outcome
//! - `tipjar_confirmations_total` (counter): settled confirmation waits

/// Record the outcome of a node HTTP request.
pub fn record_node_request(operation: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!(
        "tipjar_node_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
}

/// Record an announce attempt.
pub fn record_announce(accepted: bool) {
    let outcome = if accepted { "accepted" } else { "rejected" };
    metrics::counter!("tipjar_announces_total", "outcome" => outcome).increment(1);
}

/// Record a settled confirmation wait.
pub fn record_confirmation(confirmed: bool) {
    let outcome = if confirmed { "confirmed" } else { "failed" };
    metrics::counter!("tipjar_confirmations_total", "outcome" => outcome).increment(1);
}
