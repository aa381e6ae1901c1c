// Parse-proxy (jiexi) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored parse-proxy source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct JiexiSource {
    pub id: i64,
    pub name: Option<String>,
    /// Proxy prefix, the video URL is appended to it
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// Name/URL pair extracted from user input, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParseRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub url: String,
}

impl ParseRecord {
    /// Build a record, treating an empty name as absent.
    #[must_use]
    pub fn new(name: Option<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()),
            url: url.into(),
        }
    }

    #[must_use]
    pub fn url_only(url: impl Into<String>) -> Self {
        Self::new(None, url)
    }
}
