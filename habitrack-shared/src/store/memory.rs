/// In-process implementation of the [`Store`] port
///
/// Used when no `DATABASE_URL` is configured and by the test suites. Data
/// lives for the lifetime of the process.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    habit::{CreateHabit, Habit, UpdateHabit},
    timer_settings::{TimerSettings, UpsertTimerSettings},
    todo::{CreateTodo, Todo, UpdateTodo},
};

#[derive(Default)]
struct Tables {
    // Insertion order doubles as creation order.
    habits: Vec<Habit>,
    todos: Vec<Todo>,
    timer_settings: HashMap<String, TimerSettings>,
}

/// Memory-backed store
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }

    async fn list_habits(&self, user_id: &str) -> StoreResult<Vec<Habit>> {
        let tables = self.tables.read().await;
        Ok(tables
            .habits
            .iter()
            .filter(|h| h.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_habit(&self, user_id: &str, data: CreateHabit) -> StoreResult<Habit> {
        let habit = Habit::new(user_id, data);
        self.tables.write().await.habits.push(habit.clone());
        Ok(habit)
    }

    async fn update_habit(&self, user_id: &str, id: Uuid, patch: UpdateHabit) -> StoreResult<Habit> {
        let mut tables = self.tables.write().await;
        let habit = tables
            .habits
            .iter_mut()
            .find(|h| h.id == id && h.user_id == user_id)
            .ok_or(StoreError::NotFound { entity: "habit", id })?;

        habit.apply(patch);
        Ok(habit.clone())
    }

    async fn delete_habit(&self, user_id: &str, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.habits.len();
        tables.habits.retain(|h| !(h.id == id && h.user_id == user_id));
        Ok(tables.habits.len() < before)
    }

    async fn list_todos(&self, user_id: &str) -> StoreResult<Vec<Todo>> {
        let tables = self.tables.read().await;
        Ok(tables
            .todos
            .iter()
            .filter(|t| t.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_todo(&self, user_id: &str, data: CreateTodo) -> StoreResult<Todo> {
        let todo = Todo::new(user_id, data);
        self.tables.write().await.todos.push(todo.clone());
        Ok(todo)
    }

    async fn update_todo(&self, user_id: &str, id: Uuid, patch: UpdateTodo) -> StoreResult<Todo> {
        let mut tables = self.tables.write().await;
        let todo = tables
            .todos
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
            .ok_or(StoreError::NotFound { entity: "todo", id })?;

        todo.apply(patch);
        Ok(todo.clone())
    }

    async fn delete_todo(&self, user_id: &str, id: Uuid) -> StoreResult<bool> {
        let mut tables = self.tables.write().await;
        let before = tables.todos.len();
        tables.todos.retain(|t| !(t.id == id && t.user_id == user_id));
        Ok(tables.todos.len() < before)
    }

    async fn get_timer_settings(&self, user_id: &str) -> StoreResult<Option<TimerSettings>> {
        Ok(self.tables.read().await.timer_settings.get(user_id).cloned())
    }

    async fn upsert_timer_settings(
        &self,
        user_id: &str,
        input: UpsertTimerSettings,
    ) -> StoreResult<TimerSettings> {
        // Read and write under one guard so concurrent partial updates compose.
        let mut tables = self.tables.write().await;

        let settings = tables
            .timer_settings
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| TimerSettings::defaults_for(user_id))
            .merge(input);

        tables
            .timer_settings
            .insert(user_id.to_string(), settings.clone());
        Ok(settings)
    }
}
