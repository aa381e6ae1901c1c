//! neovideo HTTP API
//!
//! JSON endpoints for the home aggregate, per-source browsing and the
//! administration of CMS sources and parse proxies.

pub mod http;
