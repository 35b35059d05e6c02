//! Cache Module
//!
//! Provides an in-memory cache with per-entry TTL and lazy expiry.

mod clock;
mod entry;
mod store;

#[cfg(test)]
mod property_tests;

use std::time::Duration;

// Re-export public types
pub use clock::{current_timestamp_ms, Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use store::ExpiringCache;

// == Public Constants ==
/// TTL used when a cache is built without an explicit one
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);
