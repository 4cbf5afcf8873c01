//! Koa Cache Implementation
//!
//! A small bounded key-value cache with expire-after-write, least recently
//! used eviction and a loader that fills misses on demand. Every write and
//! every removal is reported to an optional [`CacheListener`] before the
//! triggering call returns, which is what lets a secondary index mirror the
//! cache exactly.
//!
//! # Example
//!
//! ```
//! use lanai_index::config::cache::CacheConfig;
//! use lanai_index::data_structures::koa_cache::KoaCache;
//!
//! let cache = KoaCache::new(&CacheConfig::default(), |key: &u32| Some(key * 2));
//!
//! cache.put(1, 10);
//! assert_eq!(cache.get(&1), Some(10));
//!
//! // Misses go through the loader
//! assert_eq!(cache.get(&4), Some(8));
//! assert_eq!(cache.len(), 2);
//! ```

mod listener;

use lru::LruCache;
use parking_lot::Mutex;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::cache::CacheConfig;
pub use listener::{CacheListener, RemovalCause};

/// Function used to produce a value for a key that is not cached.
pub type Loader<K, V> = Box<dyn Fn(&K) -> Option<V> + Send + Sync>;

/// A stored value plus its write time for expiry.
#[derive(Debug)]
struct CacheEntry<V> {
    value: V,
    written_at: Instant,
}

/// Koa Cache is a thread-safe, bounded, self-loading cache.
///
/// Entries are kept in recency order, so finding the eviction victim is
/// constant time regardless of the cache size.
///
/// # Type Parameters
///
/// * `K` - Key type.
/// * `V` - Value type, cloned out on reads.
pub struct KoaCache<K, V> {
    entries: Mutex<LruCache<K, CacheEntry<V>>>,
    loader: Loader<K, V>,
    listener: Option<Arc<dyn CacheListener<K, V>>>,
    max_entries: Option<usize>,
    time_to_live: Option<Duration>,
}

impl<K, V> KoaCache<K, V>
where
    K: Clone + Eq + Hash,
    V: Clone,
{
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `config` - Size and expiry limits.
    /// * `loader` - Called on a miss; `None` means the key has no value.
    pub fn new<F>(config: &CacheConfig, loader: F) -> Self
    where
        F: Fn(&K) -> Option<V> + Send + Sync + 'static,
    {
        Self {
            // Capacity is enforced by `enforce_capacity` so that every
            // eviction is reported to the listener.
            entries: Mutex::new(LruCache::unbounded()),
            loader: Box::new(loader),
            listener: None,
            max_entries: config.max_entries,
            time_to_live: config.time_to_live(),
        }
    }

    /// Attaches the listener notified of every write and removal.
    pub fn with_listener(mut self, listener: Arc<dyn CacheListener<K, V>>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// Associates `value` with `key`.
    ///
    /// A previous value is reported as [`RemovalCause::Replaced`] before the
    /// new one is reported as written. If the cache grows past its maximum
    /// size, the least recently used entries are evicted.
    pub fn put(&self, key: K, value: V) {
        let mut entries = self.entries.lock();
        self.store(&mut entries, key, value);
    }

    /// Returns the value for `key`, loading it on a miss.
    ///
    /// An expired entry is removed first and counts as a miss. A loaded
    /// value is stored and reported like a put.
    pub fn get(&self, key: &K) -> Option<V> {
        if let Some(value) = self.lookup(&mut self.entries.lock(), key) {
            return Some(value);
        }

        // The loader may block, so it runs without holding the lock.
        let loaded = (self.loader)(key)?;

        let mut entries = self.entries.lock();
        if let Some(value) = self.lookup(&mut entries, key) {
            return Some(value);
        }
        self.store(&mut entries, key.clone(), loaded.clone());
        Some(loaded)
    }

    /// Returns the value for `key` without invoking the loader.
    pub fn get_if_present(&self, key: &K) -> Option<V> {
        self.lookup(&mut self.entries.lock(), key)
    }

    /// Removes `key`, returning its value if it was cached.
    pub fn remove(&self, key: &K) -> Option<V> {
        let mut entries = self.entries.lock();
        let entry = entries.pop(key)?;
        self.notify_remove(key, &entry.value, RemovalCause::Explicit);
        Some(entry.value)
    }

    /// Expires every entry older than the time-to-live.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let Some(ttl) = self.time_to_live else {
            return 0;
        };

        let mut entries = self.entries.lock();
        let expired: Vec<K> = entries
            .iter()
            .filter(|(_, entry)| entry.written_at.elapsed() > ttl)
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            if let Some(entry) = entries.pop(key) {
                self.notify_remove(key, &entry.value, RemovalCause::Expired);
            }
        }

        expired.len()
    }

    /// Whether `key` holds a value, expired or not. Does not touch recency.
    pub fn contains_key(&self, key: &K) -> bool {
        self.entries.lock().contains(key)
    }

    /// Number of stored entries, including ones that expired but were not
    /// yet cleaned up.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Whether the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Maximum number of entries, if bounded.
    pub fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Expire-after-write duration, if any.
    pub fn time_to_live(&self) -> Option<Duration> {
        self.time_to_live
    }

    fn lookup(&self, entries: &mut LruCache<K, CacheEntry<V>>, key: &K) -> Option<V> {
        if self.is_expired(entries.peek(key)?) {
            if let Some(entry) = entries.pop(key) {
                self.notify_remove(key, &entry.value, RemovalCause::Expired);
            }
            return None;
        }

        entries.get(key).map(|entry| entry.value.clone())
    }

    fn store(&self, entries: &mut LruCache<K, CacheEntry<V>>, key: K, value: V) {
        if let Some(previous) = entries.pop(&key) {
            self.notify_remove(&key, &previous.value, RemovalCause::Replaced);
        }
        self.notify_write(&key, &value);

        entries.put(
            key,
            CacheEntry {
                value,
                written_at: Instant::now(),
            },
        );

        self.enforce_capacity(entries);
    }

    fn enforce_capacity(&self, entries: &mut LruCache<K, CacheEntry<V>>) {
        let Some(max_entries) = self.max_entries else {
            return;
        };

        while entries.len() > max_entries {
            let Some((victim, entry)) = entries.pop_lru() else {
                break;
            };
            self.notify_remove(&victim, &entry.value, RemovalCause::Size);
        }
    }

    fn is_expired(&self, entry: &CacheEntry<V>) -> bool {
        self.time_to_live
            .map_or(false, |ttl| entry.written_at.elapsed() > ttl)
    }

    fn notify_write(&self, key: &K, value: &V) {
        if let Some(listener) = &self.listener {
            listener.on_write(key, value);
        }
    }

    fn notify_remove(&self, key: &K, value: &V, cause: RemovalCause) {
        if let Some(listener) = &self.listener {
            listener.on_remove(key, value, cause);
        }
    }
}

impl<K, V> fmt::Debug for KoaCache<K, V>
where
    K: Hash + Eq,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KoaCache")
            .field("len", &self.entries.lock().len())
            .field("max_entries", &self.max_entries)
            .field("time_to_live", &self.time_to_live)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}
