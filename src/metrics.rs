//! Metrics initialization for Prometheus exporter.

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::config::MetricsConfig;
use crate::error::{Error, Result};

/// Queries answered, labelled by `verdict` (`blocked` or `direct`).
pub const QUERIES_TOTAL: &str = "gfwlist_queries_total";

/// Rule list reloads, labelled by `result` (`ok` or `error`).
pub const RELOADS_TOTAL: &str = "gfwlist_reloads_total";

/// Rules in the active rule set.
pub const RULES_GAUGE: &str = "gfwlist_rules";

/// Initialize the metrics system based on configuration.
///
/// When metrics are enabled, this starts an HTTP server that exposes
/// a `/metrics` endpoint for Prometheus to scrape.
///
/// When metrics are disabled, this is a no-op. The `metrics` crate
/// handles unregistered metrics gracefully (they become no-ops).
pub fn init(config: &MetricsConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    PrometheusBuilder::new()
        .with_http_listener(config.listen)
        .install()
        .map_err(|err| Error::Metrics(err.to_string()))?;

    metrics::describe_counter!(QUERIES_TOTAL, "Routing queries answered");
    metrics::describe_counter!(RELOADS_TOTAL, "Rule list reload attempts");
    metrics::describe_gauge!(RULES_GAUGE, "Rules in the active rule set");

    Ok(())
}
