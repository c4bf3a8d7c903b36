//! File-backed TTL cache: one JSON record per key under a single directory.
//!
//! Reads never fail. A missing, expired or unreadable record is a miss, and
//! the latter two are removed on the way out. Expiry is only checked lazily
//! on `get` and during `cleanup_expired`.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use crate::config::constants::CACHE_FILE_EXTENSION;
use crate::errors::{SmartIssuesError, SmartIssuesResult};
use crate::structs::cache_entry::CacheEntry;
use crate::structs::cache_stats::CacheStats;

const MAX_VERBATIM_KEY_LEN: usize = 128;

pub struct CacheManager {
    cache_dir: PathBuf,
    default_ttl: u64,
}

impl CacheManager {
    pub fn new(cache_dir: PathBuf, default_ttl: u64) -> SmartIssuesResult<Self> {
        fs::create_dir_all(&cache_dir).map_err(|e| {
            SmartIssuesError::file_error(&cache_dir.to_string_lossy(), "create cache directory", &e.to_string())
        })?;

        Ok(Self {
            cache_dir,
            default_ttl,
        })
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    fn get_cache_path(&self, key: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.{}", Self::file_stem(key), CACHE_FILE_EXTENSION))
    }

    /// Short keys made of `[a-z0-9_-]` are used verbatim. Anything else is
    /// hashed, and the `.key` suffix keeps hashed stems apart from verbatim ones.
    fn file_stem(key: &str) -> String {
        let verbatim = !key.is_empty()
            && key.len() <= MAX_VERBATIM_KEY_LEN
            && key.bytes().all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');

        if verbatim {
            key.to_string()
        } else {
            format!("{}.key", hex::encode(Sha256::digest(key.as_bytes())))
        }
    }

    pub fn get(&self, key: &str) -> Option<Value> {
        let path = self.get_cache_path(key);

        let entry = match Self::read_entry(&path) {
            EntryRead::Missing => return None,
            EntryRead::Corrupt(reason) => {
                log::warn!("⚠️ Dropping unreadable cache entry {}: {}", key, reason);
                self.delete(key);
                return None;
            }
            EntryRead::Found(entry) => entry,
        };

        if entry.key != key {
            log::debug!("📋 Cache record at {} belongs to another key", path.display());
            return None;
        }

        if entry.is_expired() {
            log::debug!("⌛ Cache entry {} expired", key);
            self.delete(key);
            return None;
        }

        log::debug!("📋 Cache hit for {}", key);
        Some(entry.value)
    }

    /// Typed read. A value that no longer matches `T` is handled like corruption.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = self.get(key)?;

        match serde_json::from_value(value) {
            Ok(typed) => Some(typed),
            Err(e) => {
                log::warn!("⚠️ Cache entry {} has an unexpected shape: {}", key, e);
                self.delete(key);
                None
            }
        }
    }

    /// Writes a record stamped with the current time, replacing any existing one.
    pub fn set(&self, key: &str, value: Value, ttl: Option<u64>) -> SmartIssuesResult<()> {
        let entry = CacheEntry::new(key.to_string(), value, ttl.unwrap_or(self.default_ttl));
        let path = self.get_cache_path(key);

        let content = serde_json::to_string_pretty(&entry)?;
        fs::write(&path, content)
            .map_err(|e| SmartIssuesError::cache_error(&format!("write {}", path.display()), &e.to_string()))?;

        log::debug!("💾 Cached {} for {}s", key, entry.ttl);
        Ok(())
    }

    pub fn set_as<T: Serialize>(&self, key: &str, value: &T, ttl: Option<u64>) -> SmartIssuesResult<()> {
        self.set(key, serde_json::to_value(value)?, ttl)
    }

    pub fn delete(&self, key: &str) -> bool {
        let path = self.get_cache_path(key);

        match fs::remove_file(&path) {
            Ok(()) => true,
            Err(e) if e.kind() == ErrorKind::NotFound => false,
            Err(e) => {
                log::warn!("⚠️ Failed to delete cache entry {}: {}", path.display(), e);
                false
            }
        }
    }

    pub fn clear(&self) -> SmartIssuesResult<usize> {
        let mut count = 0;

        for path in self.entry_paths()? {
            if Self::remove(&path) {
                count += 1;
            }
        }

        log::debug!("🧹 Cleared {} cache entries", count);
        Ok(count)
    }

    /// Removes expired and unreadable records, leaving valid ones in place.
    pub fn cleanup_expired(&self) -> SmartIssuesResult<usize> {
        let mut count = 0;
        let now = CacheEntry::current_timestamp();

        for path in self.entry_paths()? {
            let stale = match Self::read_entry(&path) {
                EntryRead::Missing => false,
                EntryRead::Corrupt(_) => true,
                EntryRead::Found(entry) => entry.is_expired_at(now),
            };

            if stale && Self::remove(&path) {
                count += 1;
            }
        }

        Ok(count)
    }

    /// Read-only inventory of the cache directory.
    pub fn stats(&self) -> SmartIssuesResult<CacheStats> {
        let mut total_entries = 0;
        let mut expired_entries = 0;
        let mut total_size_bytes = 0;
        let now = CacheEntry::current_timestamp();

        for path in self.entry_paths()? {
            let expired = match Self::read_entry(&path) {
                EntryRead::Missing => continue,
                EntryRead::Corrupt(_) => true,
                EntryRead::Found(entry) => entry.is_expired_at(now),
            };

            total_entries += 1;
            total_size_bytes += fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
            if expired {
                expired_entries += 1;
            }
        }

        Ok(CacheStats {
            total_entries,
            valid_entries: total_entries - expired_entries,
            expired_entries,
            total_size_bytes,
            location: self.cache_dir.clone(),
        })
    }

    fn entry_paths(&self) -> SmartIssuesResult<Vec<PathBuf>> {
        let read_dir = match fs::read_dir(&self.cache_dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(vec![]),
            Err(e) => {
                return Err(SmartIssuesError::cache_error(
                    &format!("list {}", self.cache_dir.display()),
                    &e.to_string(),
                ))
            }
        };

        let paths = read_dir
            .filter_map(Result::ok)
            .map(|dir_entry| dir_entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(CACHE_FILE_EXTENSION))
            .collect();

        Ok(paths)
    }

    fn read_entry(path: &Path) -> EntryRead {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return EntryRead::Missing,
            Err(e) => return EntryRead::Corrupt(e.to_string()),
        };

        match serde_json::from_str::<CacheEntry>(&content) {
            Ok(entry) => EntryRead::Found(entry),
            Err(e) => EntryRead::Corrupt(e.to_string()),
        }
    }

    fn remove(path: &Path) -> bool {
        match fs::remove_file(path) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("⚠️ Failed to remove {}: {}", path.display(), e);
                false
            }
        }
    }
}

enum EntryRead {
    Missing,
    Corrupt(String),
    Found(CacheEntry),
}
