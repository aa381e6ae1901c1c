//! neovideo core
//!
//! Configuration, storage, caching, parse-proxy ingestion and the services
//! behind the HTTP API. Upstream CMS clients live in `neovideo-providers`.

pub mod bootstrap;
pub mod cache;
pub mod config;
pub mod error;
pub mod ingest;
pub mod logging;
pub mod models;
pub mod repository;
pub mod service;

pub use config::Config;
pub use error::{Error, Result};
