// src/feed.rs
//! Shared handle over the loaded collection.
//!
//! The collection is swapped whole: readers clone the inner `Arc` and filter
//! against that snapshot, so a reload never shows a half-updated list.

use std::sync::{Arc, RwLock};

use crate::loader::{load_news, types::NewsLoader};
use crate::model::NewsItem;

#[derive(Debug, Clone)]
pub enum FeedState {
    Ready(Arc<Vec<NewsItem>>),
    /// Last load failed; carries the reason shown to the user.
    Unavailable(String),
}

#[derive(Clone)]
pub struct FeedHandle {
    inner: Arc<RwLock<FeedState>>,
}

impl FeedHandle {
    pub fn new(state: FeedState) -> Self {
        Self {
            inner: Arc::new(RwLock::new(state)),
        }
    }

    pub fn ready(items: Vec<NewsItem>) -> Self {
        Self::new(FeedState::Ready(Arc::new(items)))
    }

    pub fn snapshot(&self) -> FeedState {
        match self.inner.read() {
            Ok(g) => g.clone(),
            Err(poison) => poison.into_inner().clone(),
        }
    }

    fn set(&self, state: FeedState) {
        match self.inner.write() {
            Ok(mut g) => *g = state,
            Err(poison) => *poison.into_inner() = state,
        }
    }

    /// Run the loader and swap in the result. On failure the previous
    /// collection is kept if there was one.
    /// Returns the number of items now served.
    pub async fn reload(&self, loader: &dyn NewsLoader) -> anyhow::Result<usize> {
        match load_news(loader).await {
            Ok(items) => {
                let n = items.len();
                self.set(FeedState::Ready(Arc::new(items)));
                Ok(n)
            }
            Err(e) => {
                if matches!(self.snapshot(), FeedState::Unavailable(_)) {
                    self.set(FeedState::Unavailable(format!("{e:#}")));
                }
                Err(e)
            }
        }
    }
}
