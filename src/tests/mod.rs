//! Test modules for the Lanai index.
//!
//! This module contains the tests that cut across components:
//! - Property-based tests for the trie using proptest
//! - Facade tests covering registration, validation, expiry and eviction
//! - Listener contract tests with mockall
//! - Configuration loading tests
//! - Shared fixtures and strategies

pub mod error_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{record_index, word_strategy, Record};
