//! Backend construction
//!
//! Turns a stored source row into a ready-to-use [`CmsBackend`]. Every backend
//! shares the one pooled HTTP client owned by the factory.

use std::sync::Arc;

use neovideo_providers::{
    build_http_client, CmsBackend, HttpClientOptions, MaccmsClient, ProviderClientError,
};
use reqwest::Client;

use crate::models::CmsSource;

/// Builds the client for one registered source.
pub trait BackendFactory: Send + Sync {
    /// Fails when the source's settings cannot produce a client, e.g. an
    /// unknown response-format tag.
    fn backend_for(&self, source: &CmsSource) -> Result<Arc<dyn CmsBackend>, ProviderClientError>;
}

/// Factory for MacCMS endpoints.
#[derive(Debug, Clone)]
pub struct MaccmsBackendFactory {
    client: Client,
}

impl MaccmsBackendFactory {
    pub fn new(options: &HttpClientOptions) -> Result<Self, ProviderClientError> {
        Ok(Self::with_client(build_http_client(options)?))
    }

    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl BackendFactory for MaccmsBackendFactory {
    fn backend_for(&self, source: &CmsSource) -> Result<Arc<dyn CmsBackend>, ProviderClientError> {
        let client = MaccmsClient::from_tag(&source.api, &source.resp_type, self.client.clone())?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn source(api: &str, resp_type: &str) -> CmsSource {
        CmsSource {
            id: 1,
            name: "test".to_string(),
            api: api.to_string(),
            resp_type: resp_type.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_builds_json_and_xml_backends() {
        let factory = MaccmsBackendFactory::with_client(Client::new());
        assert!(factory
            .backend_for(&source("https://cms.example.com/api.php/provide/vod", "json"))
            .is_ok());
        assert!(factory
            .backend_for(&source("https://cms.example.com/api.php/provide/vod", "xml"))
            .is_ok());
    }

    #[test]
    fn test_rejects_unknown_format_tag() {
        let factory = MaccmsBackendFactory::with_client(Client::new());
        let result = factory.backend_for(&source("https://cms.example.com/vod", "yaml"));
        assert!(matches!(result, Err(ProviderClientError::InvalidConfig(_))));
    }
}
