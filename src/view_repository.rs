use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use cqrs_es::persist::{PersistenceError, ViewContext, ViewRepository};
use cqrs_es::{Aggregate, View};
use tokio::sync::RwLock;

/// Keeps views in process memory for as long as the page session lives.
///
/// Versions are tracked the same way a database-backed repository would,
/// so a `GenericQuery` can sit on top of it unchanged.
pub struct MemViewRepository<V, A> {
    views: RwLock<HashMap<String, (V, i64)>>,
    _aggregate: PhantomData<fn() -> A>,
}

impl<V, A> Default for MemViewRepository<V, A> {
    fn default() -> Self {
        Self {
            views: RwLock::new(HashMap::new()),
            _aggregate: PhantomData,
        }
    }
}

impl<V, A> MemViewRepository<V, A> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.views.read().await.is_empty()
    }
}

#[async_trait]
impl<V, A> ViewRepository<V, A> for MemViewRepository<V, A>
where
    V: View<A> + Clone,
    A: Aggregate,
{
    async fn load(&self, view_id: &str) -> Result<Option<V>, PersistenceError> {
        Ok(self
            .views
            .read()
            .await
            .get(view_id)
            .map(|(view, _)| view.clone()))
    }

    async fn load_with_context(
        &self,
        view_id: &str,
    ) -> Result<Option<(V, ViewContext)>, PersistenceError> {
        Ok(self.views.read().await.get(view_id).map(|(view, version)| {
            (
                view.clone(),
                ViewContext::new(view_id.to_string(), *version),
            )
        }))
    }

    async fn update_view(&self, view: V, context: ViewContext) -> Result<(), PersistenceError> {
        let mut views = self.views.write().await;
        let current = views
            .get(&context.view_instance_id)
            .map_or(0, |(_, version)| *version);
        if current != context.version {
            tracing::warn!(
                view_id = %context.view_instance_id,
                expected = context.version,
                found = current,
                "view version conflict"
            );
            return Err(PersistenceError::OptimisticLockError);
        }
        views.insert(context.view_instance_id, (view, context.version + 1));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::reservation::Reservation;
    use crate::queries::ReservationView;

    type Repo = MemViewRepository<ReservationView, Reservation>;

    #[tokio::test]
    async fn missing_view_loads_as_none() {
        let repo = Repo::new();

        let loaded = ViewRepository::<ReservationView, Reservation>::load(&repo, "nope")
            .await
            .unwrap();

        assert!(loaded.is_none());
        assert!(repo.is_empty().await);
    }

    #[tokio::test]
    async fn update_bumps_version() {
        let repo = Repo::new();

        repo.update_view(ReservationView::default(), ViewContext::new("a".to_string(), 0))
            .await
            .unwrap();
        let (_, context) = repo.load_with_context("a").await.unwrap().unwrap();

        assert_eq!(context.version, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn stale_update_is_rejected() {
        let repo = Repo::new();
        repo.update_view(ReservationView::default(), ViewContext::new("a".to_string(), 0))
            .await
            .unwrap();

        let result = repo
            .update_view(ReservationView::default(), ViewContext::new("a".to_string(), 0))
            .await;

        assert!(matches!(result, Err(PersistenceError::OptimisticLockError)));
    }
}
