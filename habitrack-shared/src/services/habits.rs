/// Habits service

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::models::habit::{CreateHabit, Habit, UpdateHabit};
use crate::store::{Store, StoreResult};

#[derive(Clone)]
pub struct HabitsService {
    store: Arc<dyn Store>,
}

impl HabitsService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All habits of the user, oldest first
    pub async fn list(&self, user_id: &str) -> StoreResult<Vec<Habit>> {
        self.store.list_habits(user_id).await
    }

    pub async fn create(&self, user_id: &str, data: CreateHabit) -> StoreResult<Habit> {
        let habit = self.store.insert_habit(user_id, data).await?;
        debug!(user_id, habit_id = %habit.id, "Habit created");
        Ok(habit)
    }

    /// Fails with `StoreError::NotFound` when the user owns no such habit
    pub async fn update(&self, user_id: &str, id: Uuid, patch: UpdateHabit) -> StoreResult<Habit> {
        let habit = self.store.update_habit(user_id, id, patch).await?;
        debug!(user_id, habit_id = %id, "Habit updated");
        Ok(habit)
    }

    /// Succeeds whether or not the habit existed
    pub async fn delete(&self, user_id: &str, id: Uuid) -> StoreResult<()> {
        let removed = self.store.delete_habit(user_id, id).await?;
        debug!(user_id, habit_id = %id, removed, "Habit deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{memory::MemoryStore, StoreError};

    fn service() -> HabitsService {
        HabitsService::new(Arc::new(MemoryStore::new()))
    }

    #[tokio::test]
    async fn test_create_then_list() {
        let service = service();
        let created = service
            .create(
                "user_1",
                CreateHabit {
                    name: "Stretch".to_string(),
                    description: Some("morning".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(service.list("user_1").await.unwrap(), vec![created]);
        assert!(service.list("user_2").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_habit() {
        let err = service()
            .update("user_1", Uuid::new_v4(), UpdateHabit::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_habit_is_ok() {
        assert!(service().delete("user_1", Uuid::new_v4()).await.is_ok());
    }
}
