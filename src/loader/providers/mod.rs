// src/loader/providers/mod.rs
pub mod file;
pub mod http;
pub mod fixed;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::NewsItem;

/// Accepted payload shapes: a bare array, or `{ "items": [...] }`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Payload {
    Bare(Vec<NewsItem>),
    Wrapped { items: Vec<NewsItem> },
}

pub(crate) fn parse_payload(body: &str, origin: &str) -> Result<Vec<NewsItem>> {
    let payload: Payload = serde_json::from_str(body.trim())
        .with_context(|| format!("parsing news collection from {origin}"))?;
    Ok(match payload {
        Payload::Bare(items) | Payload::Wrapped { items } => items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE: &str = r#"{
        "id": "x", "title": "t", "summary": "s", "url": "u",
        "publishedAt": "2024-05-02T10:00:00Z", "sopStage": "Monitor",
        "focus": "Corporate", "keywords": [], "sourceId": "a",
        "sourceName": "A", "confidence": 1, "followUpAction": ""
    }"#;

    #[test]
    fn accepts_bare_and_wrapped() {
        let bare = format!("[{ONE}]");
        assert_eq!(parse_payload(&bare, "test").unwrap().len(), 1);
        let wrapped = format!(r#"{{"items": [{ONE}, {ONE}]}}"#);
        assert_eq!(parse_payload(&wrapped, "test").unwrap().len(), 2);
    }

    #[test]
    fn rejects_unknown_stage() {
        let bad = format!("[{}]", ONE.replace("Monitor", "Escalate"));
        let err = parse_payload(&bad, "test").unwrap_err();
        assert!(format!("{err:#}").contains("parsing news collection from test"));
    }
}
