//! Ingestion of user-pasted source lists
//!
//! Turns a raw block of text into structured, deduplicated records ready to
//! be persisted.

pub mod jiexi;

pub use jiexi::parse_jiexi;
