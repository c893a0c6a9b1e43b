pub mod registry;

pub use registry::BlogRegistry;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-known metadata of one registered blog, keyed by `repo_full_name`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlogEntry {
    pub title: String,
    pub homepage: String,
    pub repo_full_name: String,
    pub favicon: Option<String>,
    pub article_count: Option<u64>,
    pub last_update: Option<DateTime<Utc>>,
}

/// Statistics Solo attaches to an upload in its `stat` form field
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BlogStat {
    #[serde(default)]
    pub article_count: Option<u64>,
    /// Epoch milliseconds of the most recent article
    #[serde(default)]
    pub recent_article_time: Option<i64>,
}

impl BlogStat {
    /// Parse the `stat` field. A malformed value is logged and ignored so it
    /// never fails an otherwise successful push.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() {
            return Self::default();
        }

        match serde_json::from_str(raw) {
            Ok(stat) => stat,
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring malformed blog stat");
                Self::default()
            }
        }
    }

    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.recent_article_time
            .and_then(DateTime::<Utc>::from_timestamp_millis)
    }
}
