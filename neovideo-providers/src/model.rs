//! Canonical catalog model
//!
//! Every upstream CMS schema is normalized into these types before it leaves
//! this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Pagination attributes as reported by the upstream backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAttributes {
    pub page_count: u64,
    pub page: u64,
    pub record_count: u64,
}

/// One entry of a backend's video list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSummary {
    pub id: u64,
    pub category_id: u64,
    pub name: String,
    /// Last modification time; the Unix epoch when upstream sent nothing usable.
    pub last: DateTime<Utc>,
}

/// A backend category ("class" in MacCMS terms).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    pub name: String,
}

/// Result of a single list-style backend call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListResult {
    #[serde(flatten)]
    pub attributes: ListAttributes,
    pub videos: Vec<VideoSummary>,
    pub categories: Vec<Category>,
}
