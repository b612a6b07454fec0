//! In-memory LRU cache and on-disk locations
//!
//! The statistics store reads whole gameweeks at a time and the same gameweek
//! is scored once per lineup, so decoded gameweeks are kept in a small LRU
//! in front of SQLite.

use lru::LruCache;
use std::{
    hash::Hash,
    num::NonZeroUsize,
    path::PathBuf,
    sync::{Mutex, MutexGuard, PoisonError},
};

/// Directory for the database and other local state:
/// `~/.cache/hoops-fantasy` (or `./.cache/hoops-fantasy` without a home).
pub fn cache_root() -> PathBuf {
    let base = dirs::cache_dir().unwrap_or_else(|| {
        let mut home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.push(".cache");
        home
    });
    base.join("hoops-fantasy")
}

/// Default SQLite location: `<cache_root>/league.db`
pub fn default_database_path() -> PathBuf {
    cache_root().join("league.db")
}

/// Thread-safe LRU cache of cloned values.
pub struct MemoryCache<K, V> {
    entries: Mutex<LruCache<K, V>>,
    capacity: usize,
}

impl<K, V> MemoryCache<K, V>
where
    K: Hash + Eq,
    V: Clone,
{
    /// Create a cache holding at most `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let size = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: Mutex::new(LruCache::new(size)),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, LruCache<K, V>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.lock().get(key).cloned()
    }

    pub fn put(&self, key: K, value: V) {
        self.lock().put(key, value);
    }

    /// Drop one entry (used when the underlying data changes)
    pub fn invalidate(&self, key: &K) {
        self.lock().pop(key);
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    /// (entries, capacity)
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.lock().len(), self.capacity)
    }
}
