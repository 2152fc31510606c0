// src/loader/types.rs
use anyhow::Result;

use crate::model::NewsItem;

/// Anything that can hand over the classified news collection.
/// Implementations may return items in any order; `load_news` restores the
/// newest-first invariant before the dashboard sees them.
#[async_trait::async_trait]
pub trait NewsLoader: Send + Sync {
    async fn load(&self) -> Result<Vec<NewsItem>>;
    fn name(&self) -> &'static str;
}
