// Caching proxy around a character describer
// Author: kelexine (https://github.com/kelexine)

use super::keys::{describe_key, pose_update_key};
use super::models::{CacheEntry, CacheOptions, Clock, SystemClock};
use crate::describer::CharacterDescriber;
use crate::error::Result;
use crate::models::CharacterDescription;
use async_trait::async_trait;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Transparent file-backed cache around any [`CharacterDescriber`].
///
/// Behaviorally identical to the wrapped target for callers: a valid, fresh
/// entry short-circuits the remote call; anything else (missing, expired,
/// corrupt, schema-incomplete) is a miss that deletes the stale file,
/// delegates to the target, and stores the fresh result. Reads fail open:
/// a broken cache file can never surface to the caller. Writes fail hard,
/// since a cache directory we cannot write to is an error worth hearing about.
///
/// Entries are written atomically (temp file + rename), so concurrent
/// same-key writers race benignly: both compute equivalent results and the
/// last rename wins.
pub struct CachingDescriber<D> {
    target: D,
    cache_dir: PathBuf,
    ttl_ms: u64,
    clock: Box<dyn Clock>,
}

impl<D: CharacterDescriber> CachingDescriber<D> {
    /// Wrap `target` with a cache under `options.dir`.
    pub fn new(target: D, options: CacheOptions) -> Self {
        Self::with_clock(target, options, Box::new(SystemClock))
    }

    /// Wrap `target` with an explicit time source (expiry tests).
    pub fn with_clock(target: D, options: CacheOptions, clock: Box<dyn Clock>) -> Self {
        Self {
            target,
            cache_dir: options.dir,
            ttl_ms: options.ttl.as_millis() as u64,
            clock,
        }
    }

    fn cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", key))
    }

    /// Delete a key's cache file. Never fails the caller: an absent file is
    /// the desired end state, and anything else is logged and ignored.
    fn invalidate(&self, key: &str) {
        match fs::remove_file(self.cache_path(key)) {
            Ok(()) => debug!(key = %&key[..16], "Invalidated cache entry"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(key = %&key[..16], "Failed to delete cache entry: {}", e),
        }
    }

    /// Look up a key. Returns the cached description only if the file
    /// deserializes into a structurally complete entry younger than the TTL;
    /// every failure path deletes the file and reports a miss.
    fn read_cache(&self, key: &str) -> Option<CharacterDescription> {
        let path = self.cache_path(key);
        if !path.exists() {
            return None;
        }

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) => {
                // Fail open: an unreadable cache is a miss, not an error
                warn!(key = %&key[..16], "Failed to read cache entry: {}", e);
                return None;
            }
        };

        // Deserialization is the structural validation: a non-numeric
        // timestamp or a value missing required description fields fails here
        let entry: CacheEntry<CharacterDescription> = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                debug!(key = %&key[..16], "Corrupt cache entry, discarding: {}", e);
                self.invalidate(key);
                return None;
            }
        };

        let age_ms = self.clock.now_ms().saturating_sub(entry.created_at_ms);
        if age_ms > self.ttl_ms {
            debug!(key = %&key[..16], age_ms, "Cache entry expired, discarding");
            self.invalidate(key);
            return None;
        }

        debug!(key = %&key[..16], age_ms, "Cache hit");
        Some(entry.value)
    }

    /// Persist a fresh result atomically: serialize to `<key>.json.tmp`,
    /// then rename over the final path so readers never observe a torn
    /// write. The cache directory is created on first use.
    fn write_cache(&self, key: &str, value: &CharacterDescription) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let path = self.cache_path(key);
        let tmp_path = self.cache_dir.join(format!("{}.json.tmp", key));

        let entry = CacheEntry {
            created_at_ms: self.clock.now_ms(),
            value: value.clone(),
        };

        fs::write(&tmp_path, serde_json::to_string_pretty(&entry)?)?;
        fs::rename(&tmp_path, &path)?;

        debug!(key = %&key[..16], "Stored cache entry");
        Ok(())
    }
}

#[async_trait]
impl<D: CharacterDescriber> CharacterDescriber for CachingDescriber<D> {
    async fn describe_from_base64(&self, base64_image: &str) -> Result<CharacterDescription> {
        let key = describe_key(base64_image);

        if let Some(cached) = self.read_cache(&key) {
            return Ok(cached);
        }

        let result = self.target.describe_from_base64(base64_image).await?;
        self.write_cache(&key, &result)?;
        Ok(result)
    }

    async fn update_pose(
        &self,
        description: &CharacterDescription,
        pose_prompt: &str,
    ) -> Result<CharacterDescription> {
        let key = pose_update_key(description, pose_prompt)?;

        if let Some(cached) = self.read_cache(&key) {
            return Ok(cached);
        }

        let updated = self.target.update_pose(description, pose_prompt).await?;
        self.write_cache(&key, &updated)?;
        Ok(updated)
    }
}
