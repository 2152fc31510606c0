// src/summary.rs
//! Aggregations over a filtered subset: lane counts, newest update, lane
//! buckets, plus the source options derived from the full collection.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::filter::{filter_items, FilterCriteria};
use crate::model::{NewsItem, SopStage};
use crate::timefmt::describe_relative;

/// Shown as "Latest update" when nothing matches.
pub const NOT_AVAILABLE: &str = "n/a";

/// Per-lane counts. Always carries all three lanes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StageCounts {
    #[serde(rename = "Monitor")]
    pub monitor: usize,
    #[serde(rename = "Assess")]
    pub assess: usize,
    #[serde(rename = "Follow-up")]
    pub follow_up: usize,
}

impl StageCounts {
    pub fn get(&self, stage: SopStage) -> usize {
        match stage {
            SopStage::Monitor => self.monitor,
            SopStage::Assess => self.assess,
            SopStage::FollowUp => self.follow_up,
        }
    }

    fn bump(&mut self, stage: SopStage) {
        match stage {
            SopStage::Monitor => self.monitor += 1,
            SopStage::Assess => self.assess += 1,
            SopStage::FollowUp => self.follow_up += 1,
        }
    }

    pub fn sum(&self) -> usize {
        self.monitor + self.assess + self.follow_up
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub total: usize,
    #[serde(rename = "perStage")]
    pub per_stage: StageCounts,
    pub newest: String,
}

/// Metrics over an already filtered, newest-first subset. `newest` describes
/// the head item; the subset is not re-sorted.
pub fn compute_metrics(items: &[&NewsItem], now: DateTime<Utc>) -> Metrics {
    let mut per_stage = StageCounts::default();
    for item in items {
        per_stage.bump(item.sop_stage);
    }
    let newest = items
        .first()
        .map(|head| describe_relative(&head.published_at, now))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Metrics {
        total: items.len(),
        per_stage,
        newest,
    }
}

/// Stable partition of a subset into the three lanes.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LaneGroups<'a> {
    #[serde(rename = "Monitor")]
    pub monitor: Vec<&'a NewsItem>,
    #[serde(rename = "Assess")]
    pub assess: Vec<&'a NewsItem>,
    #[serde(rename = "Follow-up")]
    pub follow_up: Vec<&'a NewsItem>,
}

impl<'a> LaneGroups<'a> {
    pub fn lane(&self, stage: SopStage) -> &[&'a NewsItem] {
        match stage {
            SopStage::Monitor => &self.monitor,
            SopStage::Assess => &self.assess,
            SopStage::FollowUp => &self.follow_up,
        }
    }

    fn lane_mut(&mut self, stage: SopStage) -> &mut Vec<&'a NewsItem> {
        match stage {
            SopStage::Monitor => &mut self.monitor,
            SopStage::Assess => &mut self.assess,
            SopStage::FollowUp => &mut self.follow_up,
        }
    }
}

pub fn group_by_stage<'a>(items: &[&'a NewsItem]) -> LaneGroups<'a> {
    let mut groups = LaneGroups::default();
    for &item in items {
        groups.lane_mut(item.sop_stage).push(item);
    }
    groups
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceOption {
    pub id: String,
    pub label: String,
}

/// Distinct sources of the *full* collection, keyed by `sourceId`, in order
/// of first appearance. The first name seen for an id is its label.
pub fn source_options(items: &[NewsItem]) -> Vec<SourceOption> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();
    for item in items {
        if seen.insert(item.source_id.as_str()) {
            out.push(SourceOption {
                id: item.source_id.clone(),
                label: item.source_name.clone(),
            });
        }
    }
    out
}

/// Everything the dashboard shows for one `(items, criteria, now)` triple.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView<'a> {
    pub criteria: FilterCriteria,
    pub items: Vec<&'a NewsItem>,
    pub metrics: Metrics,
    pub lanes: LaneGroups<'a>,
    pub sources: Vec<SourceOption>,
}

pub fn build_view<'a>(
    items: &'a [NewsItem],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> DashboardView<'a> {
    let filtered = filter_items(items, criteria, now);
    let metrics = compute_metrics(&filtered, now);
    let lanes = group_by_stage(&filtered);
    DashboardView {
        criteria: criteria.clone(),
        metrics,
        lanes,
        sources: source_options(items),
        items: filtered,
    }
}
