use neovideo_providers::ListResult;
use serde::{Deserialize, Serialize};

use super::CmsSource;

/// One source's slot in the home aggregate.
///
/// Exactly one of `data` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HomeItem {
    pub id: i64,
    pub name: String,
    pub api: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ListResult>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HomeItem {
    #[must_use]
    pub fn loaded(source: &CmsSource, data: ListResult) -> Self {
        Self {
            id: source.id,
            name: source.name.clone(),
            api: source.api.clone(),
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(source: &CmsSource, error: impl Into<String>) -> Self {
        Self {
            id: source.id,
            name: source.name.clone(),
            api: source.api.clone(),
            data: None,
            error: Some(error.into()),
        }
    }

    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.data.is_some()
    }
}
