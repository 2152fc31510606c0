// src/model.rs
//! News item shape shared by the loader, the filter engine, and the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// SOP triage lane assigned upstream by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SopStage {
    Monitor,
    Assess,
    #[serde(rename = "Follow-up")]
    FollowUp,
}

impl SopStage {
    /// Lanes in dashboard order.
    pub const ALL: [SopStage; 3] = [SopStage::Monitor, SopStage::Assess, SopStage::FollowUp];

    pub fn as_str(&self) -> &'static str {
        match self {
            SopStage::Monitor => "Monitor",
            SopStage::Assess => "Assess",
            SopStage::FollowUp => "Follow-up",
        }
    }

    /// Lower-case slug used in CSS class names (`stage-follow-up`).
    pub fn slug(&self) -> &'static str {
        match self {
            SopStage::Monitor => "monitor",
            SopStage::Assess => "assess",
            SopStage::FollowUp => "follow-up",
        }
    }
}

impl fmt::Display for SopStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SopStage {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monitor" => Ok(SopStage::Monitor),
            "assess" => Ok(SopStage::Assess),
            "follow-up" | "followup" | "follow_up" => Ok(SopStage::FollowUp),
            other => anyhow::bail!("unknown SOP lane: {other}"),
        }
    }
}

/// Business dimension of a news item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StrategicFocus {
    Regulatory,
    Commercial,
    Clinical,
    Manufacturing,
    Partnerships,
    Corporate,
}

impl StrategicFocus {
    pub const ALL: [StrategicFocus; 6] = [
        StrategicFocus::Regulatory,
        StrategicFocus::Commercial,
        StrategicFocus::Clinical,
        StrategicFocus::Manufacturing,
        StrategicFocus::Partnerships,
        StrategicFocus::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategicFocus::Regulatory => "Regulatory",
            StrategicFocus::Commercial => "Commercial",
            StrategicFocus::Clinical => "Clinical",
            StrategicFocus::Manufacturing => "Manufacturing",
            StrategicFocus::Partnerships => "Partnerships",
            StrategicFocus::Corporate => "Corporate",
        }
    }
}

impl fmt::Display for StrategicFocus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StrategicFocus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| anyhow::anyhow!("unknown focus: {wanted}"))
    }
}

/// One classified news item. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub url: String,
    /// Raw ISO-8601 timestamp, kept verbatim so the card can fall back to it.
    pub published_at: String,
    pub sop_stage: SopStage,
    pub focus: StrategicFocus,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub source_id: String,
    pub source_name: String,
    pub confidence: f64,
    #[serde(default)]
    pub follow_up_action: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_serde_uses_display_names() {
        let s = serde_json::to_string(&SopStage::FollowUp).unwrap();
        assert_eq!(s, "\"Follow-up\"");
        let back: SopStage = serde_json::from_str("\"Follow-up\"").unwrap();
        assert_eq!(back, SopStage::FollowUp);
        assert!(serde_json::from_str::<SopStage>("\"Escalate\"").is_err());
    }

    #[test]
    fn parse_selectors_case_insensitive() {
        assert_eq!("assess".parse::<SopStage>().unwrap(), SopStage::Assess);
        assert_eq!("FOLLOW-UP".parse::<SopStage>().unwrap(), SopStage::FollowUp);
        assert_eq!(
            "clinical".parse::<StrategicFocus>().unwrap(),
            StrategicFocus::Clinical
        );
        assert!("pricing".parse::<StrategicFocus>().is_err());
    }

    #[test]
    fn item_deserializes_camel_case() {
        let raw = r#"{
            "id": "a1",
            "title": "FDA approves biosimilar",
            "summary": "Interchangeable designation granted.",
            "url": "https://example.com/a1",
            "publishedAt": "2024-05-02T10:00:00Z",
            "sopStage": "Assess",
            "focus": "Regulatory",
            "keywords": ["FDA", "interchangeable"],
            "sourceId": "fda",
            "sourceName": "FDA",
            "confidence": 0.82,
            "followUpAction": "Brief market access team"
        }"#;
        let item: NewsItem = serde_json::from_str(raw).unwrap();
        assert_eq!(item.sop_stage, SopStage::Assess);
        assert_eq!(item.focus, StrategicFocus::Regulatory);
        assert_eq!(item.keywords.len(), 2);
        assert_eq!(item.source_id, "fda");
    }
}
