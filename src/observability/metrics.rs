//! Metrics collection and exposition.
//!
//! # Metrics
//! - `deployer_transactions_submitted_total` (counter): broadcasts by kind, outcome
//! - `deployer_confirmation_wait_seconds` (histogram): time spent waiting for depth
//! - `deployer_verifications_total` (counter): verification outcomes
//! - `deployer_rpc_errors_total` (counter): failed or timed-out RPC calls by method
//!
//! Without an installed recorder every call is a no-op, so the exporter is
//! only started when `observability.metrics_address` is set. Each command is
//! a short-lived process and the listener closes when it exits: scraping is
//! only practical while `deploy` sits in its confirmation wait (up to
//! `deployment.confirmation_timeout_secs`).

use std::net::SocketAddr;
use std::time::Duration;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint. Must run inside a tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a transaction broadcast. `kind` is `deploy` or `call`.
pub fn record_submission(kind: &'static str, accepted: bool) {
    let outcome = if accepted { "accepted" } else { "rejected" };
    counter!("deployer_transactions_submitted_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}

pub fn record_confirmation_wait(elapsed: Duration) {
    histogram!("deployer_confirmation_wait_seconds").record(elapsed.as_secs_f64());
}

pub fn record_verification(outcome: &'static str) {
    counter!("deployer_verifications_total", "outcome" => outcome).increment(1);
}

pub fn record_rpc_error(method: &'static str) {
    counter!("deployer_rpc_errors_total", "method" => method).increment(1);
}
