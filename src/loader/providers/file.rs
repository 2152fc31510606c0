// src/loader/providers/file.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;

use super::parse_payload;
use crate::loader::types::NewsLoader;
use crate::model::NewsItem;

/// Reads a JSON collection from disk on every `load`.
pub struct JsonFileLoader {
    path: PathBuf,
}

impl JsonFileLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl NewsLoader for JsonFileLoader {
    async fn load(&self) -> Result<Vec<NewsItem>> {
        let body = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("reading news collection from {}", self.path.display()))?;
        parse_payload(&body, &self.path.display().to_string())
    }

    fn name(&self) -> &'static str {
        "file"
    }
}
