//! # Time-to-live cache for a fetched collection
//!
//! Holds at most one value together with the time it was stored. A read
//! within the window returns the same `Arc` that was stored, so two hits
//! observe the identical collection. A read at or past the window is a miss,
//! as is a read from before the store time. [`TtlCache::invalidate`] forces
//! the next read to miss regardless of age.

use std::sync::Arc;
use std::time::Duration;

/// Freshness window used by the elevator list.
pub const DEFAULT_TTL: Duration = Duration::from_secs(120);

#[derive(Debug)]
pub struct TtlCache<T> {
    ttl: Duration,
    entry: Option<(Arc<T>, u64)>,
}

impl<T> TtlCache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// The stored value if it is younger than the TTL at `now_millis`.
    /// A clock reading earlier than the store time gives no usable age and
    /// counts as a miss.
    pub fn get(&self, now_millis: u64) -> Option<Arc<T>> {
        let (value, stored_at) = self.entry.as_ref()?;
        let age = now_millis.checked_sub(*stored_at)?;
        if u128::from(age) < self.ttl.as_millis() {
            Some(Arc::clone(value))
        } else {
            None
        }
    }

    /// Record `value` as fetched at `now_millis`, replacing any previous entry.
    pub fn store(&mut self, value: T, now_millis: u64) -> Arc<T> {
        let value = Arc::new(value);
        self.entry = Some((Arc::clone(&value), now_millis));
        value
    }

    /// Drop the stored value and its timestamp.
    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

impl<T> Default for TtlCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_cache_misses() {
        let cache: TtlCache<Vec<u32>> = TtlCache::default();
        assert!(cache.get(0).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn hits_within_window_share_the_same_value() {
        let mut cache = TtlCache::default();
        cache.store(vec![1, 2, 3], 1_000);

        let first = cache.get(1_000 + 30_000).unwrap();
        let second = cache.get(1_000 + 119_999).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(*first, vec![1, 2, 3]);
    }

    #[test]
    fn expires_at_exactly_the_ttl() {
        let mut cache = TtlCache::new(Duration::from_secs(120));
        cache.store("rows", 5_000);
        assert!(cache.get(5_000 + 119_999).is_some());
        assert!(cache.get(5_000 + 120_000).is_none());
    }

    #[test]
    fn invalidate_forces_a_miss() {
        let mut cache = TtlCache::default();
        cache.store(vec!["a"], 0);
        cache.invalidate();
        assert!(cache.get(1).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn clock_going_backwards_misses() {
        let mut cache = TtlCache::default();
        cache.store(1u8, 10_000);
        assert!(cache.get(9_000).is_none());
        assert!(cache.get(10_000).is_some());
        assert!(!cache.is_empty());
    }
}
