//! Time-boxed single-value cache.

use std::time::{Duration, Instant};

use tokio::sync::RwLock;

/// Default lifetime of a cached value.
pub const DEFAULT_TTL: Duration = Duration::from_secs(5 * 60);

/// Holds one value for a fixed time span.
///
/// Every [`invalidate`](Self::invalidate) starts a new generation. A value
/// fetched under an older generation is refused by
/// [`put_if_current`](Self::put_if_current).
#[derive(Debug)]
pub struct TimedCache<T> {
    ttl: Duration,
    slot: RwLock<Slot<T>>,
}

#[derive(Debug)]
struct Slot<T> {
    generation: u64,
    entry: Option<(Instant, T)>,
}

impl<T: Clone> TimedCache<T> {
    #[must_use]
    pub const fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::const_new(Slot {
                generation: 0,
                entry: None,
            }),
        }
    }

    /// The cached value, if still fresh.
    pub async fn get(&self) -> Option<T> {
        let slot = self.slot.read().await;
        slot.entry
            .as_ref()
            .filter(|(stored_at, _)| stored_at.elapsed() < self.ttl)
            .map(|(_, value)| value.clone())
    }

    /// Current generation; capture it before fetching a value to store.
    pub async fn generation(&self) -> u64 {
        self.slot.read().await.generation
    }

    pub async fn put(&self, value: T) {
        self.slot.write().await.entry = Some((Instant::now(), value));
    }

    /// Store `value` unless the cache was invalidated since `generation`.
    pub async fn put_if_current(&self, generation: u64, value: T) -> bool {
        let mut slot = self.slot.write().await;
        if slot.generation != generation {
            return false;
        }
        slot.entry = Some((Instant::now(), value));
        true
    }

    pub async fn invalidate(&self) {
        let mut slot = self.slot.write().await;
        slot.generation = slot.generation.wrapping_add(1);
        slot.entry = None;
    }
}

impl<T: Clone> Default for TimedCache<T> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fresh_value_is_returned() {
        let cache = TimedCache::default();
        assert_eq!(cache.get().await, None::<u32>);

        cache.put(7).await;
        assert_eq!(cache.get().await, Some(7));

        cache.invalidate().await;
        assert_eq!(cache.get().await, None);
    }

    #[tokio::test]
    async fn test_value_from_before_invalidation_is_refused() {
        let cache = TimedCache::default();
        let generation = cache.generation().await;

        cache.invalidate().await;

        assert!(!cache.put_if_current(generation, 1).await);
        assert_eq!(cache.get().await, None);

        let generation = cache.generation().await;
        assert!(cache.put_if_current(generation, 2).await);
        assert_eq!(cache.get().await, Some(2));
    }

    #[tokio::test]
    async fn test_expired_value_is_dropped() {
        let cache = TimedCache::new(Duration::ZERO);
        cache.put("staff").await;
        assert_eq!(cache.get().await, None);
    }
}
