//! Tests for the error module.
//!
//! This module contains tests for error handling and error types.

use crate::data_structures::pali_trie::{PaliTrie, PaliTrieError};
use crate::error::config::ConfigError;
use crate::error::{LanaiError, LanaiResult};
use std::path::PathBuf;

/// Test that blank-argument errors name the argument.
#[test]
fn test_blank_error_display() {
    let error = LanaiError::blank("cache id");
    assert!(matches!(error, LanaiError::Validation(_)));
    assert_eq!(
        error.to_string(),
        "Validation error: cache id must not be blank"
    );
}

/// Test that nested errors work correctly.
#[test]
fn test_nested_errors() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let lanai_error = LanaiError::from(io_error);

    let error_string = format!("{lanai_error}");
    assert!(error_string.starts_with("IO error"));
    assert!(error_string.contains("file not found"));
}

/// Test conversion of component errors through `?`.
#[test]
fn test_component_errors_convert() {
    fn trie_failure() -> LanaiResult<()> {
        PaliTrie::<u32>::with_min_searchable_len(0)?;
        Ok(())
    }

    fn config_failure() -> LanaiResult<()> {
        let missing: Result<(), ConfigError> =
            Err(ConfigError::FileNotFound(PathBuf::from("lanai.toml")));
        missing?;
        Ok(())
    }

    let error = trie_failure().unwrap_err();
    assert!(matches!(
        error,
        LanaiError::Trie(PaliTrieError::InvalidMinLength(0))
    ));
    assert!(error.to_string().starts_with("Trie error"));

    let error = config_failure().unwrap_err();
    assert!(matches!(
        error,
        LanaiError::Config(ConfigError::FileNotFound(_))
    ));
    assert!(error.to_string().contains("lanai.toml"));
}

/// Test serialization errors.
#[test]
fn test_serialization_error() {
    let parse_error = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let error: LanaiError = parse_error.into();
    assert!(error.to_string().starts_with("Serialization error"));
}

/// Test that registry errors carry their message unchanged.
#[test]
fn test_registry_error_display() {
    let error = LanaiError::NotFound("No cache registered with id 7".to_string());
    assert_eq!(error.to_string(), "Not found: No cache registered with id 7");

    let error = LanaiError::Duplicate("The cache with id 7 already exists".to_string());
    assert_eq!(
        error.to_string(),
        "Duplicate: The cache with id 7 already exists"
    );

    let error = LanaiError::Custom("plain".to_string());
    assert_eq!(error.to_string(), "plain");
}

/// Test configuration error display.
#[test]
fn test_config_error_display() {
    let error = ConfigError::ValueOutOfRange {
        key: "index.min_searchable_key_length".to_string(),
        message: "must be at least 1".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "Configuration value index.min_searchable_key_length is out of valid range: must be at least 1"
    );
}
