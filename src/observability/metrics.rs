//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_requests_total` (counter): dispatched requests by method, status, route
//! - `router_request_duration_seconds` (histogram): handler latency by route
//! - `router_route_not_found_total` (counter): 404s by reason
//!
//! # Design Decisions
//! - Without an installed recorder the macros are no-ops, so tests need no setup
//! - Labels for route name, not raw path, to bound cardinality

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Why a request did not reach a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// Path outside the mount prefix.
    OutsidePrefix,
    /// Route table had no match.
    NoRoute,
    /// Percent-decoded path is not UTF-8.
    InvalidEncoding,
}

impl NotFoundReason {
    pub fn as_str(self) -> &'static str {
        match self {
            NotFoundReason::OutsidePrefix => "outside_prefix",
            NotFoundReason::NoRoute => "no_route",
            NotFoundReason::InvalidEncoding => "invalid_encoding",
        }
    }
}

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a request that reached a handler.
pub fn record_request(method: &str, status: u16, route: &str, start: Instant) {
    counter!(
        "router_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route.to_string()
    )
    .increment(1);
    histogram!("router_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

/// Record a 404 produced by the dispatcher.
pub fn record_not_found(reason: NotFoundReason) {
    counter!("router_route_not_found_total", "reason" => reason.as_str()).increment(1);
}
