// tests/metrics_startup.rs
//
// The startup load must land in the Prometheus recorder: /metrics carries the
// loader series right after `build_app`, before any reload.
// Own test binary, since the recorder can only be installed once per process.

use std::path::PathBuf;

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use tower::ServiceExt as _;

use biosimilar_monitor::build_app;
use biosimilar_monitor::config::MonitorConfig;

#[tokio::test]
async fn startup_load_is_exported_on_metrics() {
    let mut cfg = MonitorConfig::default();
    cfg.data.path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/news.json");

    let app = build_app(&cfg).await.expect("build app");

    let req = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .expect("build GET");
    let resp = app.oneshot(req).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    let text = String::from_utf8(bytes.to_vec()).expect("utf8");

    assert!(text.contains("news_loaded_items 5"), "metrics:\n{text}");
    assert!(text.contains("news_load_total 1"), "metrics:\n{text}");
    assert!(text.contains("news_duplicates_dropped_total"), "metrics:\n{text}");
    assert!(
        text.contains("# HELP news_loaded_items Items in the current collection."),
        "metrics:\n{text}"
    );
    assert!(text.contains("dashboard_default_window_days 30"), "metrics:\n{text}");
}
