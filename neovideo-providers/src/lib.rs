// neovideo Provider Clients
//
// This crate contains the HTTP clients for upstream video CMS backends and
// the canonical catalog model they are normalized into.
//
// Architecture:
// - neovideo-providers: canonical model + CmsBackend trait + pure HTTP clients (MacCMS)
// - neovideo-core/service: fan-out aggregation, caching, ingestion

// Shared error types
pub mod error;

// Canonical model and backend interface
pub mod backend;
pub mod http;
pub mod model;

// HTTP clients
pub mod maccms;

// Re-export client types for convenience
pub use backend::CmsBackend;
pub use error::ProviderClientError;
pub use http::{build_http_client, HttpClientOptions};
pub use maccms::{MaccmsClient, ResponseFormat};
pub use model::{Category, ListAttributes, ListResult, VideoSummary};
