//! Error types for the Pali Trie.
//!
//! This module defines the error types that can occur during Pali Trie operations.

/// Errors that can occur in Pali Trie operations.
#[derive(Debug, thiserror::Error, PartialEq, Eq, Clone)]
pub enum PaliTrieError {
    /// Error when an empty key or prefix is provided.
    #[error("Empty key not allowed")]
    EmptyKey,

    /// Error when the configured minimum searchable length is unusable.
    #[error("Minimum searchable key length must be at least 1, got {0}")]
    InvalidMinLength(usize),
}
