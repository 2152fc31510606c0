use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use metrics::{counter, gauge, histogram};
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::debug::{self, ViewKind};
use crate::feed::{FeedHandle, FeedState};
use crate::filter::{FilterCriteria, Selector, DAY_WINDOWS};
use crate::loader::types::NewsLoader;
use crate::model::NewsItem;
use crate::render;
use crate::summary::{build_view, source_options, DashboardView};

pub const STATIC_DIR: &str = "static";

#[derive(Clone)]
pub struct AppState {
    pub feed: FeedHandle,
    loader: Arc<dyn NewsLoader>,
    default_window_days: u32,
}

impl AppState {
    /// Load the collection once. A failed load still yields a state; the
    /// dashboard then answers 503 until `/admin/reload` succeeds.
    pub async fn bootstrap(loader: Arc<dyn NewsLoader>, default_window_days: u32) -> Self {
        let feed = FeedHandle::new(FeedState::Unavailable("not loaded yet".into()));
        if let Err(e) = feed.reload(loader.as_ref()).await {
            tracing::warn!(target: "api", error = %format!("{e:#}"), "starting without news data");
        }
        Self {
            feed,
            loader,
            default_window_days,
        }
    }

    pub fn default_window_days(&self) -> u32 {
        self.default_window_days
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/", get(dashboard))
        .route("/api/news", get(api_news))
        .route("/api/sources", get(api_sources))
        .route("/admin/reload", get(admin_reload))
        .merge(debug::router())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

/// Raw query string shape. Everything optional; missing means default.
#[derive(Debug, Default, serde::Deserialize)]
pub struct DashboardQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub focus: Option<String>,
    #[serde(default)]
    pub days: Option<String>,
    /// Single source select: `all` or one id.
    #[serde(default)]
    pub source: Option<String>,
    /// Comma-separated source ids.
    #[serde(default)]
    pub sources: Option<String>,
}

impl DashboardQuery {
    pub fn into_criteria(self, default_window_days: u32) -> Result<FilterCriteria, String> {
        let mut c = FilterCriteria::default().with_window(default_window_days);

        if let Some(q) = self.q {
            c.search = q;
        }
        if let Some(s) = self.stage.as_deref() {
            c.stage = Selector::parse(s).map_err(|e| e.to_string())?;
        }
        if let Some(f) = self.focus.as_deref() {
            c.focus = Selector::parse(f).map_err(|e| e.to_string())?;
        }
        if let Some(d) = self.days.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            let days: u32 = d.parse().map_err(|_| format!("invalid days: {d}"))?;
            if !DAY_WINDOWS.contains(&days) {
                return Err(format!(
                    "days must be one of {}",
                    DAY_WINDOWS.map(|w| w.to_string()).join(", ")
                ));
            }
            c.window_days = days;
        }
        if let Some(s) = self.source.as_deref().map(str::trim) {
            if !s.is_empty() && !s.eq_ignore_ascii_case("all") {
                c.sources.insert(s.to_string());
            }
        }
        if let Some(list) = self.sources.as_deref() {
            c.sources.extend(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
            );
        }
        Ok(c)
    }
}

fn bad_request(reason: String) -> Response {
    counter!("dashboard_bad_requests_total").increment(1);
    debug::record_rejected();
    tracing::debug!(target: "api", %reason, "rejected filter");
    (StatusCode::BAD_REQUEST, reason).into_response()
}

/// Either the current items or a ready-made 503.
fn ready_items(state: &AppState, html: bool) -> Result<Arc<Vec<NewsItem>>, Response> {
    match state.feed.snapshot() {
        FeedState::Ready(items) => Ok(items),
        FeedState::Unavailable(reason) => {
            let resp = if html {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Html(render::unavailable_page(&reason)),
                )
                    .into_response()
            } else {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    format!("news data unavailable: {reason}"),
                )
                    .into_response()
            };
            Err(resp)
        }
    }
}

fn timed_view<'a>(
    kind: ViewKind,
    items: &'a [NewsItem],
    criteria: &FilterCriteria,
) -> DashboardView<'a> {
    let t0 = Instant::now();
    let view = build_view(items, criteria, Utc::now());
    let ms = t0.elapsed().as_secs_f64() * 1_000.0;

    counter!("dashboard_views_total").increment(1);
    histogram!("dashboard_filter_ms").record(ms);
    gauge!("dashboard_kept_items").set(view.metrics.total as f64);
    debug::record_view(kind, ms, view.metrics.total);
    view
}

async fn dashboard(State(state): State<AppState>, Query(q): Query<DashboardQuery>) -> Response {
    let criteria = match q.into_criteria(state.default_window_days) {
        Ok(c) => c,
        Err(reason) => return bad_request(reason),
    };
    let items = match ready_items(&state, true) {
        Ok(items) => items,
        Err(resp) => return resp,
    };
    let view = timed_view(ViewKind::Dashboard, &items, &criteria);
    Html(render::dashboard_page(&view)).into_response()
}

async fn api_news(State(state): State<AppState>, Query(q): Query<DashboardQuery>) -> Response {
    let criteria = match q.into_criteria(state.default_window_days) {
        Ok(c) => c,
        Err(reason) => return bad_request(reason),
    };
    let items = match ready_items(&state, false) {
        Ok(items) => items,
        Err(resp) => return resp,
    };
    let view = timed_view(ViewKind::Api, &items, &criteria);
    Json(view).into_response()
}

async fn api_sources(State(state): State<AppState>) -> Response {
    match ready_items(&state, false) {
        Ok(items) => Json(source_options(&items)).into_response(),
        Err(resp) => resp,
    }
}

async fn admin_reload(State(state): State<AppState>) -> Response {
    match state.feed.reload(state.loader.as_ref()).await {
        Ok(n) => format!("reloaded {n} items").into_response(),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            format!("failed: {e:#}"),
        )
            .into_response(),
    }
}
