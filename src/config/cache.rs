//! Cache configuration module.
//!
//! This module defines the limits and keying options applied to every cache
//! registered with the index.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use crate::index::KeyCase;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Per-cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of entries before least recently used ones are evicted
    pub max_entries: Option<usize>,

    /// Expire-after-write duration in milliseconds
    pub time_to_live_ms: Option<u64>,

    /// How searchable strings are normalized before indexing
    pub key_case: KeyCase,

    /// Token delimiter for free-text keys, reserved and currently not used
    pub delimiter: Option<String>,
}

impl CacheConfig {
    /// The time-to-live as a [`Duration`], if one is configured.
    pub fn time_to_live(&self) -> Option<Duration> {
        self.time_to_live_ms.map(Duration::from_millis)
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: None,
            time_to_live_ms: None,
            key_case: KeyCase::Sensitive,
            delimiter: None,
        }
    }
}

impl Validate for CacheConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_entries == Some(0) {
            return Err(ConfigError::ValidationError(
                "max_entries must be greater than 0".to_string(),
            ));
        }

        if self.time_to_live_ms == Some(0) {
            return Err(ConfigError::ValidationError(
                "time_to_live_ms must be greater than 0".to_string(),
            ));
        }

        if matches!(self.delimiter.as_deref(), Some("")) {
            return Err(ConfigError::ValidationError(
                "delimiter must not be empty when set".to_string(),
            ));
        }

        Ok(())
    }
}
