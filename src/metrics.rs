use anyhow::Context;
use axum::{routing::get, Router};
use metrics::{describe_counter, describe_gauge, describe_histogram, gauge};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub struct Metrics {
    pub handle: PrometheusHandle,
}

impl Metrics {
    /// Install the Prometheus recorder and publish the configured default
    /// window as a static gauge.
    pub fn init(default_window_days: u32) -> anyhow::Result<Self> {
        // Use default buckets to avoid API differences across crate versions.
        let handle = PrometheusBuilder::new()
            .install_recorder()
            .context("prometheus: install recorder")?;

        describe_counter!("dashboard_views_total", "Dashboard and API views served.");
        describe_counter!("dashboard_bad_requests_total", "Views rejected for invalid filters.");
        describe_histogram!("dashboard_filter_ms", "Time to filter and aggregate one view.");
        describe_gauge!("dashboard_kept_items", "Items kept by the most recent view.");
        describe_gauge!("dashboard_default_window_days", "Default recency window.");
        gauge!("dashboard_default_window_days").set(f64::from(default_window_days));
        crate::loader::describe_metrics();

        Ok(Self { handle })
    }

    /// Returns a router exposing `/metrics` with the Prometheus exposition format.
    pub fn router(&self) -> Router {
        let handle = self.handle.clone();
        Router::new().route(
            "/metrics",
            get(move || {
                let h = handle.clone();
                async move { h.render() }
            }),
        )
    }
}
