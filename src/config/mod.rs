// src/config/mod.rs
//! Service configuration: where the news collection comes from and the
//! dashboard defaults.
//!
//! Resolution order:
//! 1) `$MONITOR_CONFIG_PATH` (must exist when set)
//! 2) `config/monitor.toml`
//! 3) built-in defaults
//!
//! Then env overrides: `MONITOR_DATA_PATH`, `MONITOR_DATA_URL`,
//! `MONITOR_DEFAULT_WINDOW`.

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::filter::{DAY_WINDOWS, DEFAULT_WINDOW_DAYS};

pub const ENV_CONFIG_PATH: &str = "MONITOR_CONFIG_PATH";
pub const ENV_DATA_PATH: &str = "MONITOR_DATA_PATH";
pub const ENV_DATA_URL: &str = "MONITOR_DATA_URL";
pub const ENV_DEFAULT_WINDOW: &str = "MONITOR_DEFAULT_WINDOW";

pub const DEFAULT_CONFIG_PATH: &str = "config/monitor.toml";
pub const DEFAULT_DATA_PATH: &str = "data/news.json";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn default_window_days() -> u32 {
    DEFAULT_WINDOW_DAYS
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DataSection {
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
    /// When set, the collection is fetched over HTTP instead of read from `path`.
    #[serde(default)]
    pub url: Option<String>,
}

impl Default for DataSection {
    fn default() -> Self {
        Self {
            path: default_data_path(),
            url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSection {
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            default_window_days: default_window_days(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MonitorConfig {
    #[serde(default)]
    pub data: DataSection,
    #[serde(default)]
    pub dashboard: DashboardSection,
}

impl MonitorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let mut cfg: MonitorConfig = toml::from_str(s).context("parsing monitor config")?;
        cfg.sanitize();
        Ok(cfg)
    }

    /// Load from an explicit TOML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading monitor config from {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load using env var + fallbacks, then apply env overrides.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else {
            let default_p = PathBuf::from(DEFAULT_CONFIG_PATH);
            if default_p.exists() {
                Self::load_from(&default_p)?
            } else {
                Self::default()
            }
        };
        cfg.apply_env();
        Ok(cfg)
    }

    fn apply_env(&mut self) {
        if let Some(p) = non_empty_env(ENV_DATA_PATH) {
            self.data.path = PathBuf::from(p);
        }
        if let Some(u) = non_empty_env(ENV_DATA_URL) {
            self.data.url = Some(u);
        }
        if let Some(days) = non_empty_env(ENV_DEFAULT_WINDOW).and_then(|v| v.parse::<u32>().ok()) {
            if DAY_WINDOWS.contains(&days) {
                self.dashboard.default_window_days = days;
            } else {
                tracing::warn!(days, "ignoring {ENV_DEFAULT_WINDOW}: not an offered window");
            }
        }
    }

    fn sanitize(&mut self) {
        if !DAY_WINDOWS.contains(&self.dashboard.default_window_days) {
            self.dashboard.default_window_days = DEFAULT_WINDOW_DAYS;
        }
        if self.data.url.as_deref().is_some_and(|u| u.trim().is_empty()) {
            self.data.url = None;
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
