//! Cache entry shape, construction options, and time source.
//!
//! Author: kelexine (<https://github.com/kelexine>)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Default maximum entry age before a refresh is forced.
pub const DEFAULT_CACHE_TTL_MINUTES: u64 = 60;

/// A single cached result as stored on disk.
///
/// Entries are immutable once written: a stale or invalid entry is replaced
/// wholesale, never patched. Deserializing an entry doubles as structural
/// validation of the cached value: a file whose `value` is missing required
/// fields fails here and is treated as a miss.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// Unix timestamp in milliseconds when the entry was written.
    #[serde(rename = "createdAtMs")]
    pub created_at_ms: u64,

    /// The cached result.
    pub value: T,
}

/// Construction options for the caching proxy.
#[derive(Debug, Clone)]
pub struct CacheOptions {
    /// Directory holding one `<hexkey>.json` file per entry. Created
    /// lazily on first write.
    pub dir: PathBuf,

    /// Maximum entry age before a refresh is forced.
    pub ttl: Duration,
}

impl CacheOptions {
    /// Options with the default 60 minute TTL.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ttl: Duration::from_secs(DEFAULT_CACHE_TTL_MINUTES * 60),
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Injectable time source for entry age checks.
///
/// Production uses [`SystemClock`]; expiry tests inject a manual clock
/// instead of sleeping.
pub trait Clock: Send + Sync {
    /// Current Unix time in milliseconds.
    fn now_ms(&self) -> u64;
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        chrono::Utc::now().timestamp_millis().max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_disk_format() {
        let entry = CacheEntry {
            created_at_ms: 1_700_000_000_000,
            value: "cached".to_string(),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["createdAtMs"], 1_700_000_000_000u64);
        assert_eq!(json["value"], "cached");
    }

    #[test]
    fn test_entry_rejects_non_numeric_timestamp() {
        let raw = r#"{"createdAtMs": "soon", "value": "cached"}"#;
        assert!(serde_json::from_str::<CacheEntry<String>>(raw).is_err());
    }

    #[test]
    fn test_default_ttl() {
        let options = CacheOptions::new("/tmp/cache");
        assert_eq!(options.ttl, Duration::from_secs(3600));
    }

    #[test]
    fn test_system_clock_is_plausible() {
        // Any date after 2023 proves we're reading milliseconds, not seconds
        assert!(SystemClock.now_ms() > 1_672_531_200_000);
    }
}
