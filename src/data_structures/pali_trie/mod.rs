//! Pali Trie Implementation
//!
//! This module provides the prefix tree behind the cache index. Every
//! searchable string is stored character by character; nodes at or deeper than the
//! minimum searchable length carry the set of keys whose string passes
//! through them, so a prefix lookup is a single walk plus a set copy.
//!
//! Nodes are kept in an arena and addressed by [`NodeId`]. A node keeps the
//! handle of its parent so that removal can prune bottom-up without
//! recursion, and freed slots are recycled.
//!
//! The trie is not synchronized. Callers sharing it between threads wrap it
//! in a lock (see [`crate::index::PrefixIndex`]).

mod error;
mod node;

use hashbrown::HashSet;
use std::hash::Hash;

pub use error::PaliTrieError;
pub use node::NodeId;
use node::TrieNode;

/// Result type for Pali Trie operations
pub type PaliTrieResult<T> = Result<T, PaliTrieError>;

/// Shortest prefix length that yields matches unless configured otherwise.
pub const DEFAULT_MIN_SEARCHABLE_KEY_LENGTH: usize = 3;

/// Pali Trie maps searchable strings to sets of keys with fast prefix lookups.
///
/// Key features:
/// * Prefix results are precomputed on every node deep enough to be searched
/// * Incremental node creation on insert and pruning on remove
/// * Live counters for keys and nodes
#[derive(Debug)]
pub struct PaliTrie<T> {
    /// Node arena, slot 0 is the root sentinel
    nodes: Vec<TrieNode<T>>,

    /// Released slots ready for reuse
    free: Vec<NodeId>,

    /// Depth at which nodes start collecting keys
    min_searchable_len: usize,

    /// Live nodes, root excluded
    node_count: usize,

    /// Live (string, key) pairs
    key_count: usize,
}

impl<T> PaliTrie<T>
where
    T: Clone + Eq + Hash,
{
    /// Creates a new empty `PaliTrie` with the default minimum searchable length.
    pub fn new() -> Self {
        Self::build(DEFAULT_MIN_SEARCHABLE_KEY_LENGTH)
    }

    /// Creates a new empty `PaliTrie` that starts matching at `min_searchable_len`.
    ///
    /// # Arguments
    ///
    /// * `min_searchable_len` - Shortest prefix that returns matches, at least 1.
    ///
    /// # Returns
    ///
    /// * `Ok(PaliTrie)` - A new trie.
    /// * `Err(PaliTrieError::InvalidMinLength)` - If `min_searchable_len` is 0.
    pub fn with_min_searchable_len(min_searchable_len: usize) -> PaliTrieResult<Self> {
        if min_searchable_len == 0 {
            return Err(PaliTrieError::InvalidMinLength(min_searchable_len));
        }
        Ok(Self::build(min_searchable_len))
    }

    fn build(min_searchable_len: usize) -> Self {
        Self {
            nodes: vec![TrieNode::root()],
            free: Vec::new(),
            min_searchable_len,
            node_count: 0,
            key_count: 0,
        }
    }

    /// Indexes `key` under `searchable`.
    ///
    /// Missing nodes along the path are created and `key` is added to the
    /// value set of every node whose depth reaches the minimum searchable length.
    ///
    /// # Arguments
    ///
    /// * `searchable` - The searchable string.
    /// * `key` - The key to index.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The pair was not indexed before.
    /// * `Ok(false)` - The pair was already indexed, nothing changed.
    /// * `Err(PaliTrieError::EmptyKey)` - If `searchable` is empty.
    pub fn insert(&mut self, searchable: &str, key: T) -> PaliTrieResult<bool> {
        if searchable.is_empty() {
            return Err(PaliTrieError::EmptyKey);
        }

        let mut current = NodeId::ROOT;
        for (offset, c) in searchable.chars().enumerate() {
            current = self.child_or_insert(current, c);

            if offset + 1 >= self.min_searchable_len {
                self.nodes[current.0]
                    .values
                    .get_or_insert_with(HashSet::new)
                    .insert(key.clone());
            }
        }

        let is_new = self.nodes[current.0]
            .terminals
            .get_or_insert_with(HashSet::new)
            .insert(key);
        if is_new {
            self.key_count += 1;
        }

        Ok(is_new)
    }

    /// Removes `key` from the path of `searchable` and prunes emptied nodes.
    ///
    /// A missing path is not an error: the key was never indexed or is
    /// already gone.
    ///
    /// # Returns
    ///
    /// `true` if the full path existed and was unwound, `false` otherwise.
    pub fn remove(&mut self, searchable: &str, key: &T) -> bool {
        let terminal = match self.find(searchable) {
            Some(id) if id != NodeId::ROOT => id,
            _ => return false,
        };

        if let Some(terminals) = self.nodes[terminal.0].terminals.as_mut() {
            if terminals.remove(key) {
                self.key_count -= 1;
            }
            if terminals.is_empty() {
                self.nodes[terminal.0].terminals = None;
            }
        }

        // Climb towards the root; the sentinel has no parent and stops the walk.
        let mut current = terminal;
        while let Some(parent) = self.nodes[current.0].parent {
            let node = &mut self.nodes[current.0];
            if let Some(values) = node.values.as_mut() {
                values.remove(key);
                if values.is_empty() {
                    node.values = None;
                }
            }

            if node.is_prunable() {
                let label = node.label;
                self.nodes[parent.0].children.remove(&label);
                self.release(current);
            }

            current = parent;
        }

        true
    }

    /// Returns the keys indexed under `prefix`.
    ///
    /// The result is an owned copy, so it stays valid while the trie keeps
    /// changing.
    ///
    /// # Returns
    ///
    /// * `Ok(set)` - The keys at the prefix node. Empty when the path does not
    ///   exist or is shorter than the minimum searchable length.
    /// * `Err(PaliTrieError::EmptyKey)` - If `prefix` is empty.
    pub fn search(&self, prefix: &str) -> PaliTrieResult<std::collections::HashSet<T>> {
        if prefix.is_empty() {
            return Err(PaliTrieError::EmptyKey);
        }

        let result: std::collections::HashSet<T> = self
            .find(prefix)
            .and_then(|id| self.nodes[id.0].values.as_ref())
            .map(|values| values.iter().cloned().collect())
            .unwrap_or_default();

        Ok(result)
    }

    /// Number of live (string, key) pairs.
    pub fn len(&self) -> usize {
        self.key_count
    }

    /// Whether no key is indexed.
    pub fn is_empty(&self) -> bool {
        self.key_count == 0 && self.node_count == 0
    }

    /// Number of live nodes, not counting the root.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Depth at which nodes start collecting keys.
    pub fn min_searchable_len(&self) -> usize {
        self.min_searchable_len
    }

    /// Walks `path` from the root without creating anything.
    fn find(&self, path: &str) -> Option<NodeId> {
        let mut current = NodeId::ROOT;
        for c in path.chars() {
            current = *self.nodes[current.0].children.get(&c)?;
        }
        Some(current)
    }

    fn child_or_insert(&mut self, parent: NodeId, c: char) -> NodeId {
        if let Some(&child) = self.nodes[parent.0].children.get(&c) {
            return child;
        }

        let node = TrieNode::new(c, Some(parent));
        let child = match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.0] = node;
                slot
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        };

        self.nodes[parent.0].children.insert(c, child);
        self.node_count += 1;
        child
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id.0] = TrieNode::new('\0', None);
        self.free.push(id);
        self.node_count -= 1;
    }
}

impl<T> Default for PaliTrie<T>
where
    T: Clone + Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
