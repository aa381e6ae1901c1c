//! MacCMS Provider Client
//!
//! HTTP client for MacCMS `api.php/provide/vod` endpoints, the de facto
//! collection API spoken by most third-party video catalog sites.
//!
//! # Example
//!
//! ```no_run
//! use neovideo_providers::{CmsBackend, MaccmsClient, ResponseFormat};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = MaccmsClient::new(
//!     "https://cms.example.com/api.php/provide/vod",
//!     ResponseFormat::Json,
//!     reqwest::Client::new(),
//! )?;
//! let home = client.fetch_home().await?;
//! let hits = client.search("三体", 1).await?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod decode;
pub mod types;

pub use client::MaccmsClient;
pub use types::ResponseFormat;
