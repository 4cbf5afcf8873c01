//! Lanai Index Library
//!
//! A prefix-searchable secondary index over values held in one or more
//! eviction-capable in-memory caches. Callers retrieve "every cached value
//! whose searchable string starts with a given prefix" without scanning the
//! caches.
//!
//! # Architecture
//!
//! - [`data_structures::pali_trie`] - the arena-backed prefix tree
//! - [`data_structures::koa_cache`] - the bounded, self-loading cache that
//!   reports every write and removal
//! - [`index`] - the adapter binding caches to the trie, and the facade
//! - [`config`] and [`error`] - layered configuration and error types

pub mod config;
pub mod data_structures;
pub mod error;
pub mod index;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use error::{LanaiError, LanaiResult};
pub use index::{EntryKey, EntryValue, KeyCase, PrefixIndex};

/// Version information for the Lanai index.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
