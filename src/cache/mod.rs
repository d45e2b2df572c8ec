//! File-backed description cache.
//!
//! Wraps any [`CharacterDescriber`](crate::describer::CharacterDescriber)
//! behind a content-addressed, TTL-bounded cache of one pretty-printed JSON
//! file per key, so repeated describe/pose calls with identical inputs never
//! repeat a paid API call.
//!
//! # Submodules
//!
//! - `keys`: Deterministic SHA-256 cache key derivation.
//! - `models`: Cache entry shape, options, and the injectable clock.
//! - `proxy`: The caching describer itself.
//!
//! Author: kelexine (<https://github.com/kelexine>)

pub mod keys;
pub mod models;
pub mod proxy;

pub use models::{CacheEntry, CacheOptions, Clock, SystemClock, DEFAULT_CACHE_TTL_MINUTES};
pub use proxy::CachingDescriber;
