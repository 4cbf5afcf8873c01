//! Index configuration module.

use super::{ConfigResult, Validate};
use crate::data_structures::pali_trie::DEFAULT_MIN_SEARCHABLE_KEY_LENGTH;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Prefix index configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IndexConfig {
    /// Shortest prefix that returns matches
    pub min_searchable_key_length: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            min_searchable_key_length: DEFAULT_MIN_SEARCHABLE_KEY_LENGTH,
        }
    }
}

impl Validate for IndexConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.min_searchable_key_length == 0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "index.min_searchable_key_length".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}
