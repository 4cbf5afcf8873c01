//! Error module for the Lanai index.
//!
//! This module provides the crate-wide error type. Component errors (the trie,
//! configuration) keep their own enums and convert into [`LanaiError`] with `?`.

use thiserror::Error;

use crate::data_structures::pali_trie::PaliTrieError;

pub mod config;

/// Result type alias used throughout the Lanai index.
pub type LanaiResult<T> = Result<T, LanaiError>;

/// Core error enum for the Lanai index.
#[derive(Error, Debug)]
pub enum LanaiError {
    /// A mandatory argument was blank or empty.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An operation referenced a cache id that is not registered.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A cache id was registered twice.
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Errors raised by the prefix trie.
    #[error("Trie error: {0}")]
    Trie(#[from] PaliTrieError),

    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

impl LanaiError {
    /// Builds a [`LanaiError::Validation`] for a blank argument.
    pub fn blank(argument: &str) -> Self {
        Self::Validation(format!("{argument} must not be blank"))
    }
}
