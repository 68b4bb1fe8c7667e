/// Todos service

use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::models::todo::{CreateTodo, Todo, UpdateTodo};
use crate::store::{Store, StoreResult};

#[derive(Clone)]
pub struct TodosService {
    store: Arc<dyn Store>,
}

impl TodosService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All todos of the user, oldest first
    pub async fn list(&self, user_id: &str) -> StoreResult<Vec<Todo>> {
        self.store.list_todos(user_id).await
    }

    pub async fn create(&self, user_id: &str, data: CreateTodo) -> StoreResult<Todo> {
        let todo = self.store.insert_todo(user_id, data).await?;
        debug!(user_id, todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    /// Fails with `StoreError::NotFound` when the user owns no such todo
    pub async fn update(&self, user_id: &str, id: Uuid, patch: UpdateTodo) -> StoreResult<Todo> {
        let todo = self.store.update_todo(user_id, id, patch).await?;
        debug!(user_id, todo_id = %id, completed = todo.completed, "Todo updated");
        Ok(todo)
    }

    /// Succeeds whether or not the todo existed
    pub async fn delete(&self, user_id: &str, id: Uuid) -> StoreResult<()> {
        let removed = self.store.delete_todo(user_id, id).await?;
        debug!(user_id, todo_id = %id, removed, "Todo deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;

    #[tokio::test]
    async fn test_complete_todo() {
        let service = TodosService::new(Arc::new(MemoryStore::new()));
        let todo = service
            .create(
                "user_1",
                CreateTodo {
                    content: "Write tests".to_string(),
                    completed: false,
                },
            )
            .await
            .unwrap();

        let updated = service
            .update(
                "user_1",
                todo.id,
                UpdateTodo {
                    completed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert!(updated.completed);
        assert_eq!(updated.content, "Write tests");
        assert_eq!(service.list("user_1").await.unwrap(), vec![updated]);
    }
}
