// src/loader/mod.rs
pub mod providers;
pub mod types;

use crate::config::MonitorConfig;
use crate::loader::providers::{file::JsonFileLoader, http::HttpJsonLoader};
use crate::loader::types::NewsLoader;
use crate::model::NewsItem;
use crate::timefmt::parse_published;
use anyhow::Result;
use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use once_cell::sync::OnceCell;
use std::cmp::Reverse;
use std::collections::HashSet;

/// Register help text for the loader series. Called by `Metrics::init` once
/// the recorder exists; descriptions sent before that are lost.
pub fn describe_metrics() {
    describe_counter!("news_load_total", "Collection loads attempted.");
    describe_counter!("news_load_errors_total", "Collection loads that failed.");
    describe_counter!(
        "news_load_http_errors_total",
        "Upstream HTTP failures while fetching the collection."
    );
    describe_counter!(
        "news_duplicates_dropped_total",
        "Items dropped because their id was already present."
    );
    describe_gauge!("news_loaded_items", "Items in the current collection.");
    describe_histogram!("news_load_ms", "Collection load time in milliseconds.");
}

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(describe_metrics);
}

/// Drop repeated ids (first wins) and order newest first. The sort is stable,
/// so items sharing a timestamp keep their loader order; unparsable
/// timestamps sink to the end.
/// Returns (items, duplicates_dropped).
pub fn prepare_items(raw: Vec<NewsItem>) -> (Vec<NewsItem>, usize) {
    let mut seen: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut dup = 0usize;
    let mut items = Vec::with_capacity(raw.len());
    for item in raw {
        if !seen.insert(item.id.clone()) {
            dup += 1;
            continue;
        }
        items.push(item);
    }
    items.sort_by_cached_key(|it| Reverse(parse_published(&it.published_at)));
    (items, dup)
}

/// Run `loader` once and hand back a dashboard-ready collection.
pub async fn load_news(loader: &dyn NewsLoader) -> Result<Vec<NewsItem>> {
    ensure_metrics_described();
    counter!("news_load_total").increment(1);

    let t0 = std::time::Instant::now();
    let raw = match loader.load().await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(target: "loader", error = ?e, loader = loader.name(), "news load failed");
            counter!("news_load_errors_total").increment(1);
            return Err(e);
        }
    };

    let (items, dup) = prepare_items(raw);
    histogram!("news_load_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
    counter!("news_duplicates_dropped_total").increment(dup as u64);
    gauge!("news_loaded_items").set(items.len() as f64);

    tracing::info!(
        target: "loader",
        loader = loader.name(),
        items = items.len(),
        duplicates = dup,
        "news collection loaded"
    );
    Ok(items)
}

/// Pick the loader named by the config: a URL wins over a path.
pub fn loader_from_config(cfg: &MonitorConfig) -> Result<Box<dyn NewsLoader>> {
    match &cfg.data.url {
        Some(url) => Ok(Box::new(HttpJsonLoader::new(url.clone())?)),
        None => Ok(Box::new(JsonFileLoader::new(cfg.data.path.clone()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::providers::fixed::StaticLoader;
    use crate::model::{SopStage, StrategicFocus};

    fn item(id: &str, ts: &str) -> NewsItem {
        NewsItem {
            id: id.into(),
            title: id.into(),
            summary: String::new(),
            url: String::new(),
            published_at: ts.into(),
            sop_stage: SopStage::Monitor,
            focus: StrategicFocus::Commercial,
            keywords: vec![],
            source_id: "s".into(),
            source_name: "S".into(),
            confidence: 0.5,
            follow_up_action: String::new(),
        }
    }

    fn ids(items: &[NewsItem]) -> Vec<&str> {
        items.iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn prepare_sorts_newest_first_and_sinks_garbage() {
        let raw = vec![
            item("old", "2024-01-01T00:00:00Z"),
            item("bad", "yesterday-ish"),
            item("new", "2024-03-01T00:00:00Z"),
            item("mid", "2024-02-01T00:00:00Z"),
        ];
        let (items, dup) = prepare_items(raw);
        assert_eq!(dup, 0);
        assert_eq!(ids(&items), vec!["new", "mid", "old", "bad"]);
    }

    #[test]
    fn prepare_keeps_first_duplicate_and_ties_stable() {
        let raw = vec![
            item("a", "2024-01-01T00:00:00Z"),
            item("b", "2024-01-01T00:00:00Z"),
            item("a", "2024-05-01T00:00:00Z"),
        ];
        let (items, dup) = prepare_items(raw);
        assert_eq!(dup, 1);
        assert_eq!(ids(&items), vec!["a", "b"]);
        assert_eq!(items[0].published_at, "2024-01-01T00:00:00Z");
    }

    #[tokio::test]
    async fn load_news_runs_static_loader() {
        let loader = StaticLoader::new(vec![
            item("x", "2024-01-01T00:00:00Z"),
            item("y", "2024-02-01T00:00:00Z"),
        ]);
        let items = load_news(&loader).await.unwrap();
        assert_eq!(ids(&items), vec!["y", "x"]);
    }
}
