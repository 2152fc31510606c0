//! Prints the dashboard numbers for the configured collection to stdout.
//!
//! Usage: `snapshot [days] [search term...]`
//! (`days` defaults to the configured window; `0` disables recency.)

use anyhow::Context;
use biosimilar_monitor::{
    build_view, config::MonitorConfig, loader::{load_news, loader_from_config}, FilterCriteria,
    SopStage,
};
use chrono::Utc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_target(false).init();

    let cfg = MonitorConfig::load_default()?;
    let mut args = std::env::args().skip(1);
    let days = match args.next() {
        Some(d) => d.parse::<u32>().with_context(|| format!("invalid days: {d}"))?,
        None => cfg.dashboard.default_window_days,
    };
    let term = args.collect::<Vec<_>>().join(" ");

    let loader = loader_from_config(&cfg)?;
    let items = load_news(loader.as_ref()).await?;
    let criteria = FilterCriteria::default().with_window(days).with_search(term);
    let view = build_view(&items, &criteria, Utc::now());

    println!(
        "{} qualified updates (window: {} days, latest: {})",
        view.metrics.total, criteria.window_days, view.metrics.newest
    );
    for stage in SopStage::ALL {
        let lane = view.lanes.lane(stage);
        println!("\n== {stage} ({})", lane.len());
        for item in lane {
            println!("  [{}] {} ({})", item.focus, item.title, item.source_name);
        }
    }
    Ok(())
}
