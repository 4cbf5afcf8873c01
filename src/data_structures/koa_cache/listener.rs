//! Notification seam between a Koa Cache and whatever mirrors its contents.

use std::fmt;

/// Why an entry left the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemovalCause {
    /// Removed by an explicit call.
    Explicit,
    /// Overwritten by a newer value for the same key.
    Replaced,
    /// Outlived the configured time-to-live.
    Expired,
    /// Evicted to stay within the configured maximum size.
    Size,
}

impl RemovalCause {
    /// Whether the cache removed the entry on its own.
    pub fn was_evicted(&self) -> bool {
        matches!(self, RemovalCause::Expired | RemovalCause::Size)
    }
}

impl fmt::Display for RemovalCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemovalCause::Explicit => "explicit",
            RemovalCause::Replaced => "replaced",
            RemovalCause::Expired => "expired",
            RemovalCause::Size => "size",
        };
        f.write_str(name)
    }
}

/// Receives every write and removal of a cache, synchronously.
///
/// Callbacks run while the cache holds its internal lock, so they observe
/// mutations in exactly the order they happened. Implementations must not
/// call back into the same cache.
pub trait CacheListener<K, V>: Send + Sync {
    /// Called after `key` has been associated with `value`, by a put or a load.
    fn on_write(&self, key: &K, value: &V);

    /// Called when `value` stops being associated with `key`.
    fn on_remove(&self, key: &K, value: &V, cause: RemovalCause);
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(RemovalCause::Explicit, false ; "explicit")]
    #[test_case(RemovalCause::Replaced, false ; "replaced")]
    #[test_case(RemovalCause::Expired, true ; "expired")]
    #[test_case(RemovalCause::Size, true ; "size")]
    fn test_was_evicted(cause: RemovalCause, evicted: bool) {
        assert_eq!(cause.was_evicted(), evicted);
    }

    #[test]
    fn test_cause_display() {
        assert_eq!(RemovalCause::Expired.to_string(), "expired");
        assert_eq!(RemovalCause::Size.to_string(), "size");
    }
}
