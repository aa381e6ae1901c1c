//! Caching primitives
//!
//! - `TtlCache`: in-process key/value store with per-entry expiry and a
//!   background sweep
//! - `SingleFlight`: collapses concurrent loads of the same key into one

pub mod singleflight;
pub mod ttl;

pub use singleflight::{SingleFlight, SingleFlightError};
pub use ttl::TtlCache;
