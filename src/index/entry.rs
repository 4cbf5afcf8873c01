//! Keys and values as seen by the index.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::hash::Hash;

/// Types usable as cache ids and native cache keys.
///
/// `is_blank` lets the facade reject keys that carry no identity, such as
/// empty strings. Numeric keys are never blank.
pub trait IndexKey: Clone + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Whether this key is unusable as an identifier.
    fn is_blank(&self) -> bool {
        false
    }
}

impl IndexKey for String {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

impl IndexKey for &'static str {
    fn is_blank(&self) -> bool {
        self.trim().is_empty()
    }
}

macro_rules! impl_index_key {
    ($($t:ty),* $(,)?) => {
        $(impl IndexKey for $t {})*
    };
}

impl_index_key!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, char);

/// Identity of one index entry: the cache it lives in plus its key there.
///
/// Two caches may hold entries with the same searchable string and even the
/// same native key; the cache id keeps them apart.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey<I, K> {
    cache_id: I,
    key: K,
}

impl<I, K> EntryKey<I, K> {
    /// Creates a composite key.
    pub fn new(cache_id: I, key: K) -> Self {
        Self { cache_id, key }
    }

    /// The owning cache.
    pub fn cache_id(&self) -> &I {
        &self.cache_id
    }

    /// The key inside the owning cache.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Splits the composite key into its parts.
    pub fn into_parts(self) -> (I, K) {
        (self.cache_id, self.key)
    }
}

/// A cached value that can be found by prefix.
///
/// `search_key` must return the same string for as long as the value stays
/// cached, otherwise its removal cannot find the indexed path again.
pub trait EntryValue {
    /// The raw searchable string, `None` when the value should not be indexed.
    fn search_key(&self) -> Option<&str>;
}

impl EntryValue for String {
    fn search_key(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

/// Lowercases `raw` one character at a time.
///
/// Unlike [`str::to_lowercase`] this ignores context, so the fold of a prefix
/// is always a prefix of the fold of the whole string (a Greek capital sigma
/// folds to `σ` wherever it appears).
pub fn fold_case(raw: &str) -> String {
    raw.chars().flat_map(char::to_lowercase).collect()
}

/// How a cache's searchable strings are normalized before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyCase {
    /// Strings are indexed exactly as returned by the value.
    #[default]
    Sensitive,
    /// Strings are lowercased before indexing.
    Insensitive,
}

impl KeyCase {
    /// Normalizes a raw searchable string.
    ///
    /// Absent and empty strings yield `None`, meaning "do not index".
    pub fn normalize<'a>(&self, raw: Option<&'a str>) -> Option<Cow<'a, str>> {
        let raw = raw.filter(|raw| !raw.is_empty())?;
        match self {
            KeyCase::Sensitive => Some(Cow::Borrowed(raw)),
            KeyCase::Insensitive => Some(Cow::Owned(fold_case(raw))),
        }
    }

    /// The normalized searchable string of `value`.
    pub fn searchable<'a, V: EntryValue + ?Sized>(&self, value: &'a V) -> Option<Cow<'a, str>> {
        self.normalize(value.search_key())
    }
}
