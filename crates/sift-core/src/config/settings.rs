use crate::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub remote: RemoteConfig,
}

impl Config {
    /// Load config from file. A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        super::validation::warn_unknown_fields(&content, "config.json");
        let config = serde_json::from_str(&content)?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchConfig {
    /// Quiet window before a non-blank query is committed
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    /// Cap applied to each category before merging (unlimited when absent)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_per_category: Option<usize>,

    /// Number of committed queries kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl SearchConfig {
    #[must_use]
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

fn default_debounce() -> u64 {
    300
}
fn default_history_limit() -> usize {
    crate::DEFAULT_HISTORY_LIMIT
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce(),
            max_per_category: None,
            history_limit: default_history_limit(),
        }
    }
}

/// Remote full-text search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Per-request timeout. No timeout when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

impl RemoteConfig {
    /// Full URL of the search endpoint
    #[must_use]
    pub fn search_url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let endpoint = self.endpoint.trim_start_matches('/');
        format!("{base}/{endpoint}")
    }

    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

fn default_true() -> bool {
    true
}
fn default_base_url() -> String {
    "http://localhost:3000".to_string()
}
fn default_endpoint() -> String {
    "/api/search".to_string()
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            base_url: default_base_url(),
            endpoint: default_endpoint(),
            timeout_ms: None,
        }
    }
}
