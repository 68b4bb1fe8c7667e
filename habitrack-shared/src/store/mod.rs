/// Persistence port
///
/// The service objects talk to storage only through the [`Store`] trait so the
/// same handlers run against Postgres in production and an in-process store in
/// development and tests.
///
/// # Implementations
///
/// - [`postgres::PgStore`]: sqlx over a `PgPool`
/// - [`memory::MemoryStore`]: `tokio::sync::RwLock` over plain collections
///
/// # Ownership
///
/// Every operation takes the owning `user_id`. Records of other users are
/// invisible: updating one reports `NotFound`, deleting one removes nothing.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    habit::{CreateHabit, Habit, UpdateHabit},
    timer_settings::{TimerSettings, UpsertTimerSettings},
    todo::{CreateTodo, Todo, UpdateTodo},
};

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No record with this ID belongs to the user
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: Uuid },

    /// Underlying database failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait Store: Send + Sync {
    /// Backend name reported by diagnostics (`postgres`, `memory`)
    fn backend(&self) -> &'static str;

    /// Checks that the backend is reachable
    async fn ping(&self) -> StoreResult<()>;

    // --- Habits ---
    async fn list_habits(&self, user_id: &str) -> StoreResult<Vec<Habit>>;

    async fn insert_habit(&self, user_id: &str, data: CreateHabit) -> StoreResult<Habit>;

    async fn update_habit(&self, user_id: &str, id: Uuid, patch: UpdateHabit) -> StoreResult<Habit>;

    /// Returns whether a record was removed
    async fn delete_habit(&self, user_id: &str, id: Uuid) -> StoreResult<bool>;

    // --- Todos ---
    async fn list_todos(&self, user_id: &str) -> StoreResult<Vec<Todo>>;

    async fn insert_todo(&self, user_id: &str, data: CreateTodo) -> StoreResult<Todo>;

    async fn update_todo(&self, user_id: &str, id: Uuid, patch: UpdateTodo) -> StoreResult<Todo>;

    /// Returns whether a record was removed
    async fn delete_todo(&self, user_id: &str, id: Uuid) -> StoreResult<bool>;

    // --- Timer settings ---
    async fn get_timer_settings(&self, user_id: &str) -> StoreResult<Option<TimerSettings>>;

    /// Merges `input` over the stored settings (or the defaults) in one atomic
    /// step and returns the saved record. `created_at` is kept on update.
    async fn upsert_timer_settings(
        &self,
        user_id: &str,
        input: UpsertTimerSettings,
    ) -> StoreResult<TimerSettings>;
}
