//! Metrics collection and exposition.
//!
//! # Metrics
//! - `spa_navigations_total` (counter): resolutions by route, view and outcome
//! - `spa_request_duration_seconds` (histogram): handler latency
//!
//! # Design Decisions
//! - Exposed on a separate listener so the route table owns every main URL
//! - Labels for route, view and outcome (`view` or `redirect`)

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::routing::Resolution;

/// Start the Prometheus scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Outcome label for a resolution.
pub fn outcome(resolution: &Resolution) -> &'static str {
    if resolution.is_redirect() {
        "redirect"
    } else {
        "view"
    }
}

/// Record one served navigation.
pub fn record_navigation(resolution: &Resolution, start: Instant) {
    let route = resolution.route.clone().unwrap_or_else(|| "unnamed".to_string());
    let view = resolution.view.component_name();
    let outcome = outcome(resolution);

    counter!(
        "spa_navigations_total",
        "route" => route,
        "view" => view,
        "outcome" => outcome
    )
    .increment(1);

    histogram!("spa_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteTable;

    #[test]
    fn test_outcome_labels() {
        let table = RouteTable::default_table();
        assert_eq!(outcome(&table.resolve_path("/config")), "view");
        assert_eq!(outcome(&table.resolve_path("/elsewhere")), "redirect");
    }

    #[test]
    fn test_record_without_recorder() {
        let table = RouteTable::default_table();
        record_navigation(&table.resolve_path("/mapping"), Instant::now());
    }
}
