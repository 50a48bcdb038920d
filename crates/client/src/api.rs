//! Backend abstraction for managers and views.

use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    cache::TimedCache,
    error::ClientResult,
    models::{Entity, StaffDraft, StaffMember},
};

/// The four operations every entity endpoint answers.
#[async_trait]
pub trait EntityApi<E: Entity>: Send + Sync {
    /// Every row, in server order.
    async fn list(&self) -> ClientResult<Vec<E>>;

    async fn create(&self, draft: &E::Draft) -> ClientResult<E>;

    async fn update(&self, id: &str, draft: &E::Draft) -> ClientResult<E>;

    /// Deleting an absent id succeeds.
    async fn delete(&self, id: &str) -> ClientResult<()>;
}

#[async_trait]
impl<E: Entity, A: EntityApi<E> + ?Sized> EntityApi<E> for Arc<A> {
    async fn list(&self) -> ClientResult<Vec<E>> {
        (**self).list().await
    }

    async fn create(&self, draft: &E::Draft) -> ClientResult<E> {
        (**self).create(draft).await
    }

    async fn update(&self, id: &str, draft: &E::Draft) -> ClientResult<E> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        (**self).delete(id).await
    }
}

/// Staff directory backend with a memoised list.
///
/// Writes made through this wrapper drop the cached list.
pub struct CachedStaffApi<A> {
    inner: A,
    cache: TimedCache<Vec<StaffMember>>,
}

impl<A: EntityApi<StaffMember>> CachedStaffApi<A> {
    pub const fn new(inner: A, cache: TimedCache<Vec<StaffMember>>) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &A {
        &self.inner
    }
}

#[async_trait]
impl<A: EntityApi<StaffMember>> EntityApi<StaffMember> for CachedStaffApi<A> {
    async fn list(&self) -> ClientResult<Vec<StaffMember>> {
        if let Some(members) = self.cache.get().await {
            tracing::debug!(count = members.len(), "Staff directory served from cache");
            return Ok(members);
        }

        let generation = self.cache.generation().await;
        let members = self.inner.list().await?;
        if !self.cache.put_if_current(generation, members.clone()).await {
            tracing::debug!("Staff directory changed while listing; not cached");
        }
        Ok(members)
    }

    async fn create(&self, draft: &StaffDraft) -> ClientResult<StaffMember> {
        let result = self.inner.create(draft).await;
        self.cache.invalidate().await;
        result
    }

    async fn update(&self, id: &str, draft: &StaffDraft) -> ClientResult<StaffMember> {
        let result = self.inner.update(id, draft).await;
        self.cache.invalidate().await;
        result
    }

    async fn delete(&self, id: &str) -> ClientResult<()> {
        let result = self.inner.delete(id).await;
        self.cache.invalidate().await;
        result
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::manager::tests::MemoryApi;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    fn draft(name: &str) -> StaffDraft {
        StaffDraft {
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_list_is_memoised() {
        let api = CachedStaffApi::new(MemoryApi::<StaffMember>::default(), TimedCache::default());

        api.list().await.unwrap();
        api.list().await.unwrap();
        assert_eq!(api.inner().calls(), 1);
    }

    #[tokio::test]
    async fn test_writes_invalidate() {
        let api = CachedStaffApi::new(MemoryApi::<StaffMember>::default(), TimedCache::default());

        assert!(api.list().await.unwrap().is_empty());
        api.create(&draft("Budi")).await.unwrap();

        let members = api.list().await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(api.inner().calls(), 3);
    }

    /// Backend whose first list blocks until released, after reading rows.
    #[derive(Default)]
    struct SlowListApi {
        inner: MemoryApi<StaffMember>,
        hold_first: AtomicBool,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl EntityApi<StaffMember> for SlowListApi {
        async fn list(&self) -> ClientResult<Vec<StaffMember>> {
            let rows = self.inner.list().await?;
            if self.hold_first.swap(false, Ordering::SeqCst) {
                self.entered.notify_one();
                self.release.notified().await;
            }
            Ok(rows)
        }

        async fn create(&self, draft: &StaffDraft) -> ClientResult<StaffMember> {
            self.inner.create(draft).await
        }

        async fn update(&self, id: &str, draft: &StaffDraft) -> ClientResult<StaffMember> {
            self.inner.update(id, draft).await
        }

        async fn delete(&self, id: &str) -> ClientResult<()> {
            self.inner.delete(id).await
        }
    }

    #[tokio::test]
    async fn test_list_in_flight_during_write_is_not_cached() {
        let backend = SlowListApi::default();
        backend.hold_first.store(true, Ordering::SeqCst);
        let api = Arc::new(CachedStaffApi::new(backend, TimedCache::default()));

        let in_flight = tokio::spawn({
            let api = Arc::clone(&api);
            async move { api.list().await }
        });
        api.inner().entered.notified().await;

        api.create(&draft("Budi")).await.unwrap();
        api.inner().release.notify_one();

        // The slow call still answers with what it read.
        assert!(in_flight.await.unwrap().unwrap().is_empty());

        let members = api.list().await.unwrap();
        assert_eq!(members.len(), 1);
        assert_eq!(members[0].name, "Budi");
    }

    #[tokio::test]
    async fn test_expired_entry_refetches() {
        let api = CachedStaffApi::new(
            MemoryApi::<StaffMember>::default(),
            TimedCache::new(Duration::ZERO),
        );

        api.list().await.unwrap();
        api.list().await.unwrap();
        assert_eq!(api.inner().calls(), 2);
    }
}
