//! Node implementation for the Pali Trie.
//!
//! Nodes live in an arena owned by the trie and refer to each other through
//! [`NodeId`] handles. The parent handle is only ever followed while pruning.

use fnv::FnvBuildHasher;
use hashbrown::{HashMap, HashSet};
use std::hash::Hash;

/// Stable handle to a node slot inside the trie arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    /// The root sentinel. It is never pruned and never counted.
    pub const ROOT: NodeId = NodeId(0);
}

/// A node in the Pali Trie.
///
/// Each node represents one character position of one or more searchable
/// strings.
#[derive(Debug)]
pub struct TrieNode<T> {
    /// Character on the edge leading into this node (`'\0'` for the root)
    pub label: char,

    /// Parent handle, `None` only for the root sentinel
    pub parent: Option<NodeId>,

    /// Map of characters to child nodes
    pub children: HashMap<char, NodeId, FnvBuildHasher>,

    /// Keys reachable through this node, allocated once the node is deep enough
    pub values: Option<HashSet<T>>,

    /// Keys whose searchable string ends exactly at this node
    pub terminals: Option<HashSet<T>>,
}

impl<T: Eq + Hash> TrieNode<T> {
    /// Creates the root sentinel.
    pub fn root() -> Self {
        Self::new('\0', None)
    }

    /// Creates a new empty node hanging off `parent`.
    pub fn new(label: char, parent: Option<NodeId>) -> Self {
        Self {
            label,
            parent,
            children: HashMap::default(),
            values: None,
            terminals: None,
        }
    }

    /// Whether nothing keeps this node alive any more.
    pub fn is_prunable(&self) -> bool {
        self.children.is_empty()
            && self.values.as_ref().map_or(true, HashSet::is_empty)
            && self.terminals.as_ref().map_or(true, HashSet::is_empty)
    }
}
