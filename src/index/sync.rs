//! Keeps the shared trie in step with one cache.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{trace, warn};

use super::entry::{EntryKey, EntryValue, IndexKey, KeyCase};
use crate::data_structures::koa_cache::{CacheListener, RemovalCause};
use crate::data_structures::pali_trie::PaliTrie;

/// The trie shared by the facade and every adapter.
pub type SharedTrie<I, K> = Arc<RwLock<PaliTrie<EntryKey<I, K>>>>;

/// Cache listener that mirrors writes and removals of one cache into the trie.
///
/// The searchable string is recomputed from the value on every notification,
/// so a removal walks exactly the path its write created.
#[derive(Debug)]
pub struct TrieSync<I, K> {
    cache_id: I,
    key_case: KeyCase,
    trie: SharedTrie<I, K>,
}

impl<I, K> TrieSync<I, K>
where
    I: IndexKey,
    K: IndexKey,
{
    /// Binds `cache_id` to `trie`.
    pub fn new(cache_id: I, key_case: KeyCase, trie: SharedTrie<I, K>) -> Self {
        Self {
            cache_id,
            key_case,
            trie,
        }
    }

    /// The cache this adapter serves.
    pub fn cache_id(&self) -> &I {
        &self.cache_id
    }

    fn entry_key(&self, key: &K) -> EntryKey<I, K> {
        EntryKey::new(self.cache_id.clone(), key.clone())
    }
}

impl<I, K, V> CacheListener<K, V> for TrieSync<I, K>
where
    I: IndexKey,
    K: IndexKey,
    V: EntryValue,
{
    fn on_write(&self, key: &K, value: &V) {
        let Some(searchable) = self.key_case.searchable(value) else {
            trace!(cache_id = ?self.cache_id, ?key, "Value has no searchable key, not indexed");
            return;
        };

        match self.trie.write().insert(&searchable, self.entry_key(key)) {
            Ok(is_new) => trace!(
                cache_id = ?self.cache_id,
                ?key,
                searchable = %searchable,
                is_new,
                "Entry indexed"
            ),
            Err(e) => warn!(cache_id = ?self.cache_id, ?key, error = %e, "Failed to index entry"),
        }
    }

    fn on_remove(&self, key: &K, value: &V, cause: RemovalCause) {
        let Some(searchable) = self.key_case.searchable(value) else {
            return;
        };

        let removed = self.trie.write().remove(&searchable, &self.entry_key(key));
        trace!(
            cache_id = ?self.cache_id,
            ?key,
            searchable = %searchable,
            %cause,
            evicted = cause.was_evicted(),
            removed,
            "Entry unindexed"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shared_trie() -> SharedTrie<&'static str, u32> {
        Arc::new(RwLock::new(PaliTrie::new()))
    }

    #[test]
    fn test_write_and_remove_follow_the_value() {
        let trie = shared_trie();
        let sync = TrieSync::new("words", KeyCase::Insensitive, trie.clone());
        let value = String::from("Hello");

        sync.on_write(&1, &value);
        assert_eq!(trie.read().len(), 1);
        assert!(trie
            .read()
            .search("hel")
            .unwrap()
            .contains(&EntryKey::new("words", 1)));

        sync.on_remove(&1, &value, RemovalCause::Expired);
        assert_eq!(trie.read().len(), 0);
        assert_eq!(trie.read().node_count(), 0);
    }

    #[test]
    fn test_empty_search_key_is_skipped() {
        let trie = shared_trie();
        let sync = TrieSync::new("words", KeyCase::Sensitive, trie.clone());
        let value = String::new();

        sync.on_write(&1, &value);
        assert_eq!(trie.read().node_count(), 0);

        sync.on_remove(&1, &value, RemovalCause::Explicit);
        assert_eq!(trie.read().node_count(), 0);
    }

    #[test]
    fn test_remove_of_unindexed_entry_is_harmless() {
        let trie = shared_trie();
        let sync = TrieSync::new("words", KeyCase::Sensitive, trie.clone());

        sync.on_remove(&1, &String::from("never"), RemovalCause::Size);
        assert!(trie.read().is_empty());
        assert_eq!(sync.cache_id(), &"words");
    }
}
