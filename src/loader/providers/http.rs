// src/loader/providers/http.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use metrics::counter;
use std::time::Duration;

use super::parse_payload;
use crate::loader::types::NewsLoader;
use crate::model::NewsItem;

const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

/// Fetches the JSON collection from an upstream endpoint.
pub struct HttpJsonLoader {
    url: String,
    client: reqwest::Client,
}

impl HttpJsonLoader {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .context("building http client")?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl NewsLoader for HttpJsonLoader {
    async fn load(&self) -> Result<Vec<NewsItem>> {
        let resp = match self.client.get(&self.url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(target: "loader", error = ?e, url = %self.url, "http loader error");
                counter!("news_load_http_errors_total").increment(1);
                return Err(e).context("news http get()");
            }
        };
        let status = resp.status();
        if !status.is_success() {
            counter!("news_load_http_errors_total").increment(1);
            anyhow::bail!("news endpoint {} answered {status}", self.url);
        }
        let body = resp.text().await.context("news http .text()")?;
        parse_payload(&body, &self.url)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
