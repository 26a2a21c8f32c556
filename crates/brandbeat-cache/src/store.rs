//! File-backed TTL key-value store.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// On-disk entry envelope: `{"timestamp": <epoch-millis>, "data": <payload>}`.
#[derive(Debug, Serialize, Deserialize)]
struct CacheFile {
    timestamp: u64,
    data: serde_json::Value,
}

/// Keyed, TTL-based, file-persisted cache for serializable payloads.
///
/// Constructed once at process start; the cache directory is created during
/// construction. The TTL applies store-wide — there is no per-entry override.
///
/// Concurrent writers to the same key are not locked against each other:
/// the last writer wins. Both writers produce equivalent payloads for a given
/// key, so this is accepted rather than guarded (see DESIGN.md).
pub struct CacheStore {
    dir: PathBuf,
    ttl: Duration,
}

impl CacheStore {
    /// Create a store rooted at `dir` with a fixed `ttl`, creating the
    /// directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>, ttl: Duration) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, ttl })
    }

    /// Look up `key`, returning the payload if the entry is still within the
    /// TTL window.
    ///
    /// Absence is a normal outcome, never an error: a missing file, an
    /// expired entry, an unreadable file, or a payload that fails to
    /// deserialize all report `None`. Expired and corrupt entries are
    /// physically removed on the way out.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key);

        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(key, error = %e, "cache read failed; treating as miss");
                return None;
            }
        };

        let entry: CacheFile = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(key, error = %e, "corrupt cache entry; removing");
                self.remove_entry(key, &path);
                return None;
            }
        };

        if now_millis().saturating_sub(entry.timestamp) >= ttl_millis(self.ttl) {
            tracing::debug!(key, "cache entry expired; removing");
            self.remove_entry(key, &path);
            return None;
        }

        match serde_json::from_value(entry.data) {
            Ok(payload) => Some(payload),
            Err(e) => {
                tracing::warn!(key, error = %e, "cache payload has unexpected shape; removing");
                self.remove_entry(key, &path);
                None
            }
        }
    }

    /// Persist `payload` under `key`, overwriting any prior entry.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Serialize`] if the payload cannot be encoded and
    /// [`CacheError::Io`] if the file cannot be written.
    pub fn put<T: Serialize>(&self, key: &str, payload: &T) -> Result<(), CacheError> {
        let entry = CacheFile {
            timestamp: now_millis(),
            data: serde_json::to_value(payload).map_err(|e| CacheError::Serialize {
                key: key.to_string(),
                source: e,
            })?,
        };
        let encoded = serde_json::to_string(&entry).map_err(|e| CacheError::Serialize {
            key: key.to_string(),
            source: e,
        })?;
        fs::write(self.path_for(key), encoded)?;
        Ok(())
    }

    /// Delete every entry in the cache directory. Returns the number of
    /// entries removed.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Io`] if the directory cannot be listed.
    pub fn purge(&self) -> Result<usize, CacheError> {
        let mut removed = 0;
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                if let Err(e) = fs::remove_file(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "cache purge: remove failed");
                } else {
                    removed += 1;
                }
            }
        }
        Ok(removed)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", sanitize_key(key)))
    }

    fn remove_entry(&self, key: &str, path: &std::path::Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(key, error = %e, "failed to remove cache entry");
            }
        }
    }
}

/// Map a cache key to a filesystem-safe filename stem. Distinct keys that
/// sanitize to the same stem would collide, but keys here are derived from
/// brand queries and differ in their alphanumeric content.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

fn ttl_millis(ttl: Duration) -> u64 {
    u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
