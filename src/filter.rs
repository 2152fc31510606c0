// src/filter.rs
//! Filter criteria and the per-item predicate behind the dashboard.
//!
//! Everything here is a pure function of `(items, criteria, now)`: the HTTP
//! layer rebuilds a `FilterCriteria` from the query string on every request
//! and recomputes the view from scratch.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

use crate::model::{NewsItem, SopStage, StrategicFocus};
use crate::timefmt::parse_published;

/// Recency windows offered by the dashboard, in days.
pub const DAY_WINDOWS: [u32; 5] = [7, 14, 30, 60, 90];
pub const DEFAULT_WINDOW_DAYS: u32 = 30;

const SECS_PER_DAY: f64 = 86_400.0;

/// `All` or one concrete value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T: fmt::Display> fmt::Display for Selector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::All => f.write_str("All"),
            Selector::Only(v) => v.fmt(f),
        }
    }
}

impl<T: fmt::Display> Serialize for Selector<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<T: PartialEq> Selector<T> {
    pub fn admits(&self, value: &T) -> bool {
        match self {
            Selector::All => true,
            Selector::Only(want) => want == value,
        }
    }
}

impl<T: std::str::FromStr<Err = anyhow::Error>> Selector<T> {
    /// `""`, `"all"` (any case) → `All`; anything else must parse as `T`.
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let t = raw.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("all") {
            return Ok(Selector::All);
        }
        Ok(Selector::Only(t.parse()?))
    }
}

/// Immutable snapshot of the user's filter selections.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub search: String,
    pub stage: Selector<SopStage>,
    pub focus: Selector<StrategicFocus>,
    /// Selected source ids; empty means every source.
    pub sources: BTreeSet<String>,
    /// Maximum age in days; `0` disables the recency check.
    pub window_days: u32,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            search: String::new(),
            stage: Selector::All,
            focus: Selector::All,
            sources: BTreeSet::new(),
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl FilterCriteria {
    pub fn with_window(mut self, days: u32) -> Self {
        self.window_days = days;
        self
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn with_stage(mut self, stage: SopStage) -> Self {
        self.stage = Selector::Only(stage);
        self
    }

    pub fn with_focus(mut self, focus: StrategicFocus) -> Self {
        self.focus = Selector::Only(focus);
        self
    }

    pub fn with_source(mut self, source_id: impl Into<String>) -> Self {
        self.sources.insert(source_id.into());
        self
    }

    /// The source select is single-choice: the first selected id, if any.
    pub fn primary_source(&self) -> Option<&str> {
        self.sources.iter().next().map(String::as_str)
    }

    /// Whether `item` survives every active filter, search included.
    pub fn matches(&self, item: &NewsItem, now: DateTime<Utc>) -> bool {
        self.matches_term(item, now, &self.normalized_term())
    }

    /// `matches` with the search term already normalized, so a whole pass
    /// lowercases it once. Checks run cheapest first.
    fn matches_term(&self, item: &NewsItem, now: DateTime<Utc>, term: &str) -> bool {
        if self.window_days > 0 && age_in_days(item, now) > f64::from(self.window_days) {
            return false;
        }
        if !self.stage.admits(&item.sop_stage) {
            return false;
        }
        if !self.focus.admits(&item.focus) {
            return false;
        }
        if !self.sources.is_empty() && !self.sources.contains(&item.source_id) {
            return false;
        }
        if !term.is_empty() {
            return haystack(item).contains(term);
        }
        true
    }

    /// Trimmed, lower-cased search term ("" when the box is blank).
    pub fn normalized_term(&self) -> String {
        self.search.trim().to_lowercase()
    }
}

/// Elapsed days between `publishedAt` and `now`. Unparsable timestamps are
/// infinitely old, so any active window drops them.
pub fn age_in_days(item: &NewsItem, now: DateTime<Utc>) -> f64 {
    match parse_published(&item.published_at) {
        Some(published) => (now - published).num_milliseconds() as f64 / 1_000.0 / SECS_PER_DAY,
        None => f64::INFINITY,
    }
}

fn haystack(item: &NewsItem) -> String {
    format!(
        "{} {} {}",
        item.title,
        item.summary,
        item.keywords.join(" ")
    )
    .to_lowercase()
}

/// Items passing `criteria`, in their original relative order.
pub fn filter_items<'a>(
    items: &'a [NewsItem],
    criteria: &FilterCriteria,
    now: DateTime<Utc>,
) -> Vec<&'a NewsItem> {
    let term = criteria.normalized_term();
    items
        .iter()
        .filter(|item| criteria.matches_term(item, now, &term))
        .collect()
}
