/// Timer settings service
///
/// Users without a stored record get the default durations; the first
/// upsert persists a record, later ones update it in place.

use std::sync::Arc;
use tracing::debug;

use crate::models::timer_settings::{TimerSettings, UpsertTimerSettings};
use crate::store::{Store, StoreResult};

#[derive(Clone)]
pub struct TimerService {
    store: Arc<dyn Store>,
}

impl TimerService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// Stored settings, or the defaults when none were saved yet
    pub async fn get(&self, user_id: &str) -> StoreResult<TimerSettings> {
        Ok(self
            .store
            .get_timer_settings(user_id)
            .await?
            .unwrap_or_else(|| TimerSettings::defaults_for(user_id)))
    }

    /// Merges `input` over the current settings and persists the result
    ///
    /// The store does the merge atomically; absent fields keep whatever value
    /// is stored at write time.
    pub async fn upsert(&self, user_id: &str, input: UpsertTimerSettings) -> StoreResult<TimerSettings> {
        let saved = self.store.upsert_timer_settings(user_id, input).await?;

        debug!(
            user_id,
            work_duration = saved.work_duration,
            short_break_duration = saved.short_break_duration,
            long_break_duration = saved.long_break_duration,
            "Timer settings saved"
        );
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        habit::{CreateHabit, Habit, UpdateHabit},
        timer_settings::DEFAULT_SHORT_BREAK_DURATION,
        todo::{CreateTodo, Todo, UpdateTodo},
    };
    use crate::store::memory::MemoryStore;
    use async_trait::async_trait;
    use std::time::Duration;
    use uuid::Uuid;

    /// Memory store that yields for a while before every timer call, so
    /// concurrent requests interleave
    struct SlowStore(MemoryStore);

    const LATENCY: Duration = Duration::from_millis(20);

    #[async_trait]
    impl Store for SlowStore {
        fn backend(&self) -> &'static str {
            self.0.backend()
        }

        async fn ping(&self) -> StoreResult<()> {
            self.0.ping().await
        }

        async fn list_habits(&self, user_id: &str) -> StoreResult<Vec<Habit>> {
            self.0.list_habits(user_id).await
        }

        async fn insert_habit(&self, user_id: &str, data: CreateHabit) -> StoreResult<Habit> {
            self.0.insert_habit(user_id, data).await
        }

        async fn update_habit(&self, user_id: &str, id: Uuid, patch: UpdateHabit) -> StoreResult<Habit> {
            self.0.update_habit(user_id, id, patch).await
        }

        async fn delete_habit(&self, user_id: &str, id: Uuid) -> StoreResult<bool> {
            self.0.delete_habit(user_id, id).await
        }

        async fn list_todos(&self, user_id: &str) -> StoreResult<Vec<Todo>> {
            self.0.list_todos(user_id).await
        }

        async fn insert_todo(&self, user_id: &str, data: CreateTodo) -> StoreResult<Todo> {
            self.0.insert_todo(user_id, data).await
        }

        async fn update_todo(&self, user_id: &str, id: Uuid, patch: UpdateTodo) -> StoreResult<Todo> {
            self.0.update_todo(user_id, id, patch).await
        }

        async fn delete_todo(&self, user_id: &str, id: Uuid) -> StoreResult<bool> {
            self.0.delete_todo(user_id, id).await
        }

        async fn get_timer_settings(&self, user_id: &str) -> StoreResult<Option<TimerSettings>> {
            let settings = self.0.get_timer_settings(user_id).await;
            tokio::time::sleep(LATENCY).await;
            settings
        }

        async fn upsert_timer_settings(
            &self,
            user_id: &str,
            input: UpsertTimerSettings,
        ) -> StoreResult<TimerSettings> {
            tokio::time::sleep(LATENCY).await;
            self.0.upsert_timer_settings(user_id, input).await
        }
    }

    #[tokio::test]
    async fn test_get_returns_defaults_without_persisting() {
        let store = Arc::new(MemoryStore::new());
        let service = TimerService::new(store.clone());

        let settings = service.get("user_1").await.unwrap();
        assert_eq!(settings, TimerSettings {
            created_at: settings.created_at,
            updated_at: settings.updated_at,
            ..TimerSettings::defaults_for("user_1")
        });
        assert!(store.get_timer_settings("user_1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_upsert_twice_updates_in_place() {
        let service = TimerService::new(Arc::new(MemoryStore::new()));

        let first = service
            .upsert("user_1", UpsertTimerSettings {
                work_duration: Some(40),
                ..Default::default()
            })
            .await
            .unwrap();
        let second = service
            .upsert("user_1", UpsertTimerSettings {
                long_break_duration: Some(20),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(second.work_duration, 40);
        assert_eq!(second.long_break_duration, 20);
        assert_eq!(second.short_break_duration, DEFAULT_SHORT_BREAK_DURATION);
        assert_eq!(second.created_at, first.created_at);
        assert_eq!(service.get("user_1").await.unwrap(), second);
    }

    #[tokio::test]
    async fn test_concurrent_partial_upserts_all_land() {
        let service = TimerService::new(Arc::new(SlowStore(MemoryStore::new())));

        let (a, b, c) = tokio::join!(
            service.upsert("user_1", UpsertTimerSettings {
                work_duration: Some(50),
                ..Default::default()
            }),
            service.upsert("user_1", UpsertTimerSettings {
                long_break_duration: Some(30),
                ..Default::default()
            }),
            service.upsert("user_1", UpsertTimerSettings {
                sessions_until_long_break: Some(2),
                ..Default::default()
            }),
        );
        a.unwrap();
        b.unwrap();
        c.unwrap();

        let settings = service.get("user_1").await.unwrap();
        assert_eq!(settings.work_duration, 50);
        assert_eq!(settings.long_break_duration, 30);
        assert_eq!(settings.sessions_until_long_break, 2);
        assert_eq!(settings.short_break_duration, DEFAULT_SHORT_BREAK_DURATION);
    }
}
