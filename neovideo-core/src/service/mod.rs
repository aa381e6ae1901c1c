pub mod aggregator;
pub mod backend;
pub mod jiexi;
pub mod vod;

#[cfg(test)]
pub(crate) mod testing;

pub use aggregator::Aggregator;
pub use backend::{BackendFactory, MaccmsBackendFactory};
pub use jiexi::{ImportOutcome, JiexiService};
pub use vod::{HomeCacheKey, HomeCacheValue, VodService};
