// src/lib.rs
// Public library surface for the binaries and integration tests.

pub mod api;
pub mod config;
pub mod debug;
pub mod feed;
pub mod filter;
pub mod loader;
pub mod metrics;
pub mod model;
pub mod render;
pub mod summary;
pub mod timefmt;

// ---- Re-exports for stable public API ----
pub use crate::api::{create_router, AppState};
pub use crate::filter::{filter_items, FilterCriteria, Selector, DAY_WINDOWS};
pub use crate::model::{NewsItem, SopStage, StrategicFocus};
pub use crate::summary::{build_view, compute_metrics, group_by_stage, source_options};

use std::sync::Arc;

use axum::Router;

use crate::config::MonitorConfig;
use crate::loader::loader_from_config;
use crate::metrics::Metrics;

/// Install the metrics recorder, pick the loader and load the collection
/// once, then assemble the full router.
/// The recorder goes in first so the startup load is counted. A bad data
/// source never fails here (the dashboard reports it instead); an
/// unusable loader config or a second recorder does.
pub async fn build_app(cfg: &MonitorConfig) -> anyhow::Result<Router> {
    let metrics = Metrics::init(cfg.dashboard.default_window_days)?;
    let loader = loader_from_config(cfg)?;
    let state = AppState::bootstrap(Arc::from(loader), cfg.dashboard.default_window_days).await;
    Ok(create_router(state).merge(metrics.router()))
}
