//! In-process request counters served at `/debug/stats`.

use std::sync::Mutex;

use axum::{routing::get, Json, Router};
use once_cell::sync::Lazy;
use serde::Serialize;

#[derive(Default, Clone, Debug, Serialize)]
pub struct Stats {
    pub total_requests: u64,
    pub dashboard_requests: u64,
    pub api_requests: u64,
    pub rejected_requests: u64,
    pub last_filter_ms: Option<f64>,
    pub last_kept_items: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Dashboard,
    Api,
}

static STATS: Lazy<Mutex<Stats>> = Lazy::new(|| Mutex::new(Stats::default()));

fn with_stats(f: impl FnOnce(&mut Stats)) {
    let mut guard = match STATS.lock() {
        Ok(g) => g,
        Err(poison) => poison.into_inner(),
    };
    f(&mut guard);
}

pub fn record_view(kind: ViewKind, filter_ms: f64, kept: usize) {
    with_stats(|s| {
        s.total_requests += 1;
        match kind {
            ViewKind::Dashboard => s.dashboard_requests += 1,
            ViewKind::Api => s.api_requests += 1,
        }
        s.last_filter_ms = Some(filter_ms);
        s.last_kept_items = Some(kept);
    });
}

pub fn record_rejected() {
    with_stats(|s| {
        s.total_requests += 1;
        s.rejected_requests += 1;
    });
}

pub fn snapshot() -> Stats {
    let mut out = Stats::default();
    with_stats(|s| out = s.clone());
    out
}

pub fn router<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new().route("/debug/stats", get(stats))
}

async fn stats() -> Json<Stats> {
    Json(snapshot())
}
