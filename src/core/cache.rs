//! Unified caching system for both in-memory LRU cache and persistent file storage
//!
//! This module provides a two-tier caching system:
//! - L1 Cache: In-memory LRU cache for fast access
//! - L2 Cache: File system persistence for longer-term storage
//!
//! NHL feeds for finished games never change, so cached play-by-play payloads
//! stay valid indefinitely; `--refresh` bypasses and rewrites both tiers.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock, Mutex},
};

use crate::cli::types::{GameDate, GameId};

/// Application directory under the platform cache dir.
const CACHE_DIR_NAME: &str = "nhl-fantasy";

/// Base cache directory: `~/.cache/nhl-fantasy` (platform equivalent).
pub fn cache_base_dir() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join(CACHE_DIR_NAME)
}

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Generic cache key that can be used for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// Generate a string representation for file system storage
    fn to_file_key(&self) -> String;

    /// Generate the file path for this cache entry
    fn to_file_path(&self) -> PathBuf {
        cache_base_dir().join(format!("{}.json", self.to_file_key()))
    }
}

/// Cache key for play-by-play payloads (one per game).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayByPlayCacheKey {
    pub game_id: GameId,
}

impl CacheKey for PlayByPlayCacheKey {
    fn to_file_key(&self) -> String {
        format!("play_by_play_g{}", self.game_id.as_u32())
    }
}

/// Cache key for schedule payloads (one per requested date).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleCacheKey {
    pub date: GameDate,
}

impl CacheKey for ScheduleCacheKey {
    fn to_file_key(&self) -> String {
        format!("schedule_d{}", self.date.as_str().replace('-', "_"))
    }
}

/// Unified cache that combines LRU memory cache with file system persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: Arc<Mutex<LruCache<K, V>>>,
    memory_capacity: usize,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Create a new unified cache with specified memory capacity
    pub fn new(memory_capacity: usize) -> Self {
        Self {
            memory_cache: Arc::new(Mutex::new(LruCache::new(
                NonZeroUsize::new(memory_capacity).unwrap(),
            ))),
            memory_capacity,
        }
    }

    /// Get an item from cache (checks memory first, then disk)
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(value) = self.memory_cache.lock().unwrap().get(key) {
            return Some(value.clone());
        }

        // Fall back to disk cache and promote
        if let Some(value) = self.get_from_disk(key) {
            self.memory_cache
                .lock()
                .unwrap()
                .put(key.clone(), value.clone());
            return Some(value);
        }

        None
    }

    /// Put an item into cache (stores in both memory and disk)
    pub fn put(&self, key: K, value: V) {
        self.memory_cache
            .lock()
            .unwrap()
            .put(key.clone(), value.clone());

        let _ = self.put_to_disk(&key, &value);
    }

    fn get_from_disk(&self, key: &K) -> Option<V> {
        let path = key.to_file_path();
        let content = try_read_to_string(&path)?;
        serde_json::from_str(&content).ok()
    }

    fn put_to_disk(&self, key: &K, value: &V) -> std::io::Result<()> {
        let path = key.to_file_path();
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&path, &content)
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory_cache.lock().unwrap().clear();
    }

    /// Clear disk cache for a specific key (used when forcing a refresh)
    pub fn invalidate_disk_cache(&self, key: &K) -> std::io::Result<()> {
        let path = key.to_file_path();
        if path.exists() {
            std::fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Get memory cache statistics
    pub fn memory_stats(&self) -> (usize, usize) {
        let cache = self.memory_cache.lock().unwrap();
        (cache.len(), self.memory_capacity)
    }
}

/// Global cache manager for the entire application
pub struct CacheManager {
    pub play_by_play: UnifiedCache<PlayByPlayCacheKey, Value>,
    pub schedule: UnifiedCache<ScheduleCacheKey, Value>,
}

impl CacheManager {
    /// Create a new cache manager with reasonable defaults
    pub fn new() -> Self {
        Self {
            // Play-by-play payloads are large; keep a modest number in memory
            play_by_play: UnifiedCache::new(32),
            schedule: UnifiedCache::new(64),
        }
    }

    /// Clear all memory caches
    pub fn clear_all_memory(&self) {
        self.play_by_play.clear_memory();
        self.schedule.clear_memory();
    }
}

impl Default for CacheManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Global cache manager instance for use across the application
pub static GLOBAL_CACHE: LazyLock<CacheManager> = LazyLock::new(CacheManager::new);
