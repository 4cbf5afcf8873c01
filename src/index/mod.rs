//! Prefix Index
//!
//! The facade that ties caches and the trie together. Each registered cache
//! gets a [`TrieSync`] listener that indexes its entries under their
//! searchable strings; prefix queries walk the trie and resolve every match
//! through its owning cache.
//!
//! # Example
//!
//! ```
//! use lanai_index::config::cache::CacheConfig;
//! use lanai_index::index::{KeyCase, PrefixIndex};
//!
//! let index: PrefixIndex<&str, u32, String> = PrefixIndex::new();
//! let config = CacheConfig {
//!     key_case: KeyCase::Insensitive,
//!     ..CacheConfig::default()
//! };
//! index.add_cache("islands", config, |_| None).unwrap();
//!
//! index.put(&"islands", 1, "Lanai".to_string()).unwrap();
//! index.put(&"islands", 2, "Lanikai".to_string()).unwrap();
//!
//! assert_eq!(index.get_by_prefix("LAN").unwrap().len(), 2);
//! assert_eq!(index.get_by_prefix("lana").unwrap(), vec!["Lanai".to_string()]);
//! ```
//!
//! # Locking
//!
//! The trie sits behind one `RwLock` shared with every adapter. Caches
//! notify their adapter while holding their own lock, so the lock order is
//! always cache first, trie second. Queries copy their matches out of the
//! trie and release it before touching any cache.

mod entry;
mod sync;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

pub use entry::{fold_case, EntryKey, EntryValue, IndexKey, KeyCase};
pub use sync::{SharedTrie, TrieSync};

use crate::config::cache::CacheConfig;
use crate::config::index::IndexConfig;
use crate::config::Validate;
use crate::data_structures::koa_cache::KoaCache;
use crate::data_structures::pali_trie::PaliTrie;
use crate::error::{LanaiError, LanaiResult};

/// A registered cache and the normalization its adapter applies.
struct Registration<K, V> {
    cache: Arc<KoaCache<K, V>>,
    key_case: KeyCase,
}

impl<K, V> Clone for Registration<K, V> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            key_case: self.key_case,
        }
    }
}

/// Prefix-searchable index over any number of caches.
///
/// # Type Parameters
///
/// * `I` - Cache id type.
/// * `K` - Native key type shared by the registered caches.
/// * `V` - Cached value type, searchable through [`EntryValue`].
pub struct PrefixIndex<I, K, V> {
    trie: SharedTrie<I, K>,
    caches: DashMap<I, Registration<K, V>>,
}

impl<I, K, V> PrefixIndex<I, K, V>
where
    I: IndexKey,
    K: IndexKey,
    V: EntryValue + Clone + Send + Sync + 'static,
{
    /// Creates an empty index with the default minimum searchable length.
    pub fn new() -> Self {
        Self::with_trie(PaliTrie::new())
    }

    /// Creates an empty index that starts matching at `min_searchable_len`.
    pub fn with_min_searchable_len(min_searchable_len: usize) -> LanaiResult<Self> {
        Ok(Self::with_trie(PaliTrie::with_min_searchable_len(
            min_searchable_len,
        )?))
    }

    /// Creates an empty index from validated configuration.
    pub fn from_config(config: &IndexConfig) -> LanaiResult<Self> {
        config.validate()?;
        Self::with_min_searchable_len(config.min_searchable_key_length)
    }

    fn with_trie(trie: PaliTrie<EntryKey<I, K>>) -> Self {
        Self {
            trie: Arc::new(RwLock::new(trie)),
            caches: DashMap::new(),
        }
    }

    /// Registers a new cache under `cache_id`.
    ///
    /// # Arguments
    ///
    /// * `cache_id` - Unique id of the cache.
    /// * `config` - Size, expiry and key normalization of the cache.
    /// * `loader` - Produces values for keys that are not cached.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The cache is registered and indexed from now on.
    /// * `Err(LanaiError::Validation)` - If `cache_id` is blank.
    /// * `Err(LanaiError::Config)` - If `config` is invalid.
    /// * `Err(LanaiError::Duplicate)` - If `cache_id` is already registered.
    pub fn add_cache<F>(&self, cache_id: I, config: CacheConfig, loader: F) -> LanaiResult<()>
    where
        F: Fn(&K) -> Option<V> + Send + Sync + 'static,
    {
        if cache_id.is_blank() {
            return Err(LanaiError::blank("cache id"));
        }
        config.validate()?;

        match self.caches.entry(cache_id.clone()) {
            Entry::Occupied(_) => Err(LanaiError::Duplicate(format!(
                "The cache with id {cache_id:?} already exists"
            ))),
            Entry::Vacant(vacant) => {
                let listener = TrieSync::new(cache_id.clone(), config.key_case, self.trie.clone());
                let cache = KoaCache::new(&config, loader).with_listener(Arc::new(listener));

                debug!(
                    ?cache_id,
                    key_case = ?config.key_case,
                    max_entries = ?config.max_entries,
                    time_to_live_ms = ?config.time_to_live_ms,
                    delimiter = ?config.delimiter,
                    "Cache registered"
                );

                vacant.insert(Registration {
                    cache: Arc::new(cache),
                    key_case: config.key_case,
                });
                Ok(())
            }
        }
    }

    /// Stores `value` under `key` in the cache `cache_id`.
    ///
    /// The entry is searchable as soon as this returns.
    pub fn put(&self, cache_id: &I, key: K, value: V) -> LanaiResult<()> {
        if cache_id.is_blank() {
            return Err(LanaiError::blank("cache id"));
        }
        if key.is_blank() {
            return Err(LanaiError::blank("key"));
        }

        self.registration(cache_id)?.cache.put(key, value);
        Ok(())
    }

    /// Looks `key` up in the cache `cache_id`, loading it on a miss.
    pub fn get(&self, cache_id: &I, key: &K) -> LanaiResult<Option<V>> {
        Ok(self.registration(cache_id)?.cache.get(key))
    }

    /// Removes `key` from the cache `cache_id` and from the index.
    pub fn invalidate(&self, cache_id: &I, key: &K) -> LanaiResult<Option<V>> {
        Ok(self.registration(cache_id)?.cache.remove(key))
    }

    /// Returns the currently cached values whose searchable string starts
    /// with `prefix`.
    ///
    /// Every match is resolved through its cache at call time, so a value
    /// that was reloaded since it was indexed is returned in its reloaded
    /// form. Matches whose cache yields nothing are skipped. The order of
    /// the result is unspecified.
    pub fn get_by_prefix(&self, prefix: &str) -> LanaiResult<Vec<V>> {
        let keys = self.search_keys(prefix)?;

        let values = keys
            .into_iter()
            .filter_map(|entry_key| {
                let registration = self.caches.get(entry_key.cache_id())?.clone();
                registration.cache.get(entry_key.key())
            })
            .collect();

        Ok(values)
    }

    /// Returns the composite keys indexed under `prefix`.
    ///
    /// Case-insensitive caches also match a prefix that differs only in case,
    /// folded the same way their strings were folded when indexed.
    pub fn search_keys(&self, prefix: &str) -> LanaiResult<HashSet<EntryKey<I, K>>> {
        if prefix.is_empty() {
            return Err(LanaiError::blank("prefix"));
        }

        let lowered = fold_case(prefix);
        let trie = self.trie.read();
        let mut keys = trie.search(prefix)?;
        if lowered != prefix {
            let folded = trie.search(&lowered)?;
            drop(trie);
            keys.extend(folded.into_iter().filter(|entry_key| {
                self.caches
                    .get(entry_key.cache_id())
                    .map_or(false, |registration| {
                        registration.key_case == KeyCase::Insensitive
                    })
            }));
        }

        Ok(keys)
    }

    /// Expires stale entries in every cache, unindexing them.
    ///
    /// # Returns
    ///
    /// The number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let registrations: Vec<Registration<K, V>> = self
            .caches
            .iter()
            .map(|registration| registration.value().clone())
            .collect();

        let removed = registrations
            .iter()
            .map(|registration| registration.cache.cleanup_expired())
            .sum();

        debug!(removed, "Expired entries cleaned up");
        removed
    }

    /// Number of live composite keys across all caches.
    pub fn size(&self) -> usize {
        self.trie.read().len()
    }

    /// Number of live trie nodes.
    pub fn node_count(&self) -> usize {
        self.trie.read().node_count()
    }

    /// Shortest prefix that returns matches.
    pub fn min_searchable_len(&self) -> usize {
        self.trie.read().min_searchable_len()
    }

    /// Ids of all registered caches, in no particular order.
    pub fn cache_ids(&self) -> Vec<I> {
        self.caches.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of entries held by the cache `cache_id`.
    pub fn cache_len(&self, cache_id: &I) -> LanaiResult<usize> {
        Ok(self.registration(cache_id)?.cache.len())
    }

    fn registration(&self, cache_id: &I) -> LanaiResult<Registration<K, V>> {
        self.caches
            .get(cache_id)
            .map(|registration| registration.clone())
            .ok_or_else(|| {
                LanaiError::NotFound(format!("No cache registered with id {cache_id:?}"))
            })
    }
}

impl<I, K, V> Default for PrefixIndex<I, K, V>
where
    I: IndexKey,
    K: IndexKey,
    V: EntryValue + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<I, K, V> fmt::Debug for PrefixIndex<I, K, V>
where
    I: IndexKey,
    K: IndexKey,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let trie = self.trie.read();
        f.debug_struct("PrefixIndex")
            .field("caches", &self.caches.len())
            .field("size", &trie.len())
            .field("node_count", &trie.node_count())
            .finish()
    }
}
