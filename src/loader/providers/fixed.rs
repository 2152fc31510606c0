// src/loader/providers/fixed.rs
use anyhow::Result;
use async_trait::async_trait;

use crate::loader::types::NewsLoader;
use crate::model::NewsItem;

/// In-memory collection, mostly for tests.
#[derive(Debug, Clone, Default)]
pub struct StaticLoader {
    items: Vec<NewsItem>,
}

impl StaticLoader {
    pub fn new(items: Vec<NewsItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl NewsLoader for StaticLoader {
    async fn load(&self) -> Result<Vec<NewsItem>> {
        Ok(self.items.clone())
    }

    fn name(&self) -> &'static str {
        "static"
    }
}
