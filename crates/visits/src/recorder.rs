//! Visit recording.

use std::sync::Arc;

use dine_store::{DineStore, DineStoreResult};
use entities::VisitEvent;
use uuid::Uuid;

/// Records confirmed dining selections.
///
/// Each call appends exactly one event with the lockout window anchored
/// at the moment of recording. The write path does not consult cooldown
/// state and does not retry: a failed append surfaces to the caller
/// unchanged, and two racing calls for the same user both land.
pub struct VisitRecorder<S> {
    store: Arc<S>,
}

impl<S> Clone for VisitRecorder<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: DineStore> VisitRecorder<S> {
    /// Creates a recorder over the given store.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Appends one visit event recorded now and returns it.
    pub async fn record(
        &self,
        user_id: Uuid,
        home_restaurant_id: Option<Uuid>,
        visited_restaurant_id: Uuid,
    ) -> DineStoreResult<VisitEvent> {
        let event = VisitEvent::new(user_id, home_restaurant_id, visited_restaurant_id);
        let event = self.store.append_visit(event).await?;
        tracing::info!(
            event_id = %event.id,
            user_id = %event.user_id,
            visited_restaurant_id = %event.visited_restaurant_id,
            cooldown_until = %event.cooldown_until,
            "Visit recorded"
        );
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use dine_store::MemoryStore;
    use entities::cooldown_window;

    use super::*;

    #[tokio::test]
    async fn test_record_appends_one_event() {
        let store = Arc::new(MemoryStore::new());
        let recorder = VisitRecorder::new(Arc::clone(&store));
        let user_id = Uuid::new_v4();
        let restaurant_id = Uuid::new_v4();

        let event = recorder.record(user_id, None, restaurant_id).await.unwrap();

        assert_eq!(event.cooldown_until - event.recorded_at, cooldown_window());
        let latest = store.latest_visit(user_id).await.unwrap().unwrap();
        assert_eq!(latest.id, event.id);
    }

    #[tokio::test]
    async fn test_racing_records_both_land() {
        let store = Arc::new(MemoryStore::new());
        let recorder = VisitRecorder::new(Arc::clone(&store));
        let user_id = Uuid::new_v4();
        let restaurant_id = Uuid::new_v4();

        let first = recorder.record(user_id, None, restaurant_id).await.unwrap();
        let second = recorder.record(user_id, None, restaurant_id).await.unwrap();
        assert_ne!(first.id, second.id);

        let all = store
            .list_visits(dine_store::VisitFilter {
                user_id: Some(user_id),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(all.len(), 2);
    }
}
