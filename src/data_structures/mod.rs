//! Data structures for the Lanai index.
//!
//! This module contains the two building blocks of the index:
//! - the Pali Trie, a prefix tree mapping searchable strings to key sets
//! - the Koa Cache, a bounded cache that reports writes and removals

pub mod koa_cache;
pub mod pali_trie;

// Re-export common data structures
pub use koa_cache::{CacheListener, KoaCache, RemovalCause};
pub use pali_trie::{PaliTrie, PaliTrieError, PaliTrieResult};
