//! Configuration error module.
//!
//! Errors raised while loading, parsing or validating a [`crate::config::LanaiConfig`].

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The configuration file does not exist.
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    /// The configuration sources could not be parsed or merged.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A value was rejected by validation.
    #[error("Configuration validation error: {0}")]
    ValidationError(String),

    /// A numeric value is outside its accepted range.
    #[error("Configuration value {key} is out of valid range: {message}")]
    ValueOutOfRange {
        /// The key of the invalid value
        key: String,
        /// Description of the valid range
        message: String,
    },
}
