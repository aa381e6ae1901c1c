// CMS source models
//
// A CMS source is one registered MacCMS endpoint. Rows live in the `maccms`
// table and are read-only for the aggregation path.

use chrono::{DateTime, Utc};
use neovideo_providers::{ProviderClientError, ResponseFormat};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Registered upstream CMS endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CmsSource {
    pub id: i64,

    /// Display name
    pub name: String,

    /// Endpoint URL, usually ending in `api.php/provide/vod`
    pub api: String,

    /// Response format tag (`json` or `xml`)
    pub resp_type: String,

    pub created_at: DateTime<Utc>,
}

/// Payload for registering a CMS source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCmsSource {
    pub name: String,
    pub api: String,
    #[serde(default)]
    pub resp_type: String,
}

impl NewCmsSource {
    /// Trim fields, default the format tag and reject unusable input.
    pub fn normalize(self) -> Result<Self> {
        let name = self.name.trim().to_string();
        let api = self.api.trim().to_string();

        if name.is_empty() {
            return Err(Error::InvalidInput("name must not be empty".to_string()));
        }

        let parsed = url::Url::parse(&api)
            .map_err(|e| Error::InvalidInput(format!("invalid api url '{api}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(Error::InvalidInput(format!(
                "api url must use http or https, got '{}'",
                parsed.scheme()
            )));
        }

        let format: ResponseFormat = self
            .resp_type
            .parse()
            .map_err(|e: ProviderClientError| Error::InvalidInput(e.to_string()))?;

        Ok(Self {
            name,
            api,
            resp_type: format.as_str().to_string(),
        })
    }
}
