/// Postgres implementation of the [`Store`] port
///
/// Uses runtime-checked sqlx queries against the schema in `migrations/`.
///
/// # Example
///
/// ```no_run
/// use habitrack_shared::db::pool::{create_pool, DatabaseConfig};
/// use habitrack_shared::store::{postgres::PgStore, Store};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let store = PgStore::new(pool);
/// let habits = store.list_habits("user_123").await?;
/// # Ok(())
/// # }
/// ```

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::db::pool;
use crate::models::{
    habit::{CreateHabit, Habit, UpdateHabit},
    timer_settings::{
        TimerSettings, UpsertTimerSettings, DEFAULT_LONG_BREAK_DURATION,
        DEFAULT_SESSIONS_UNTIL_LONG_BREAK, DEFAULT_SHORT_BREAK_DURATION, DEFAULT_WORK_DURATION,
    },
    todo::{CreateTodo, Todo, UpdateTodo},
};

const HABIT_COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";
const TODO_COLUMNS: &str = "id, user_id, content, completed, created_at, updated_at";
const TIMER_COLUMNS: &str = "user_id, work_duration, short_break_duration, long_break_duration, \
                             sessions_until_long_break, created_at, updated_at";

/// Postgres-backed store
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wraps an existing connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying pool (for migrations and shutdown)
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> StoreResult<()> {
        pool::health_check(&self.pool).await?;
        Ok(())
    }

    async fn list_habits(&self, user_id: &str) -> StoreResult<Vec<Habit>> {
        let habits = sqlx::query_as::<_, Habit>(&format!(
            "SELECT {HABIT_COLUMNS} FROM habits WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(habits)
    }

    async fn insert_habit(&self, user_id: &str, data: CreateHabit) -> StoreResult<Habit> {
        let habit = sqlx::query_as::<_, Habit>(&format!(
            "INSERT INTO habits (user_id, name, description) VALUES ($1, $2, $3) \
             RETURNING {HABIT_COLUMNS}"
        ))
        .bind(user_id)
        .bind(data.name)
        .bind(data.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(habit)
    }

    async fn update_habit(&self, user_id: &str, id: Uuid, patch: UpdateHabit) -> StoreResult<Habit> {
        // $4 says whether the description was sent at all; $5 may be NULL to clear it
        let set_description = patch.description.is_some();

        sqlx::query_as::<_, Habit>(&format!(
            "UPDATE habits SET \
                 name = COALESCE($3, name), \
                 description = CASE WHEN $4 THEN $5 ELSE description END, \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {HABIT_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(patch.name)
        .bind(set_description)
        .bind(patch.description.flatten())
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "habit", id })
    }

    async fn delete_habit(&self, user_id: &str, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM habits WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_todos(&self, user_id: &str) -> StoreResult<Vec<Todo>> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {TODO_COLUMNS} FROM todos WHERE user_id = $1 ORDER BY created_at ASC, id ASC"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(todos)
    }

    async fn insert_todo(&self, user_id: &str, data: CreateTodo) -> StoreResult<Todo> {
        let todo = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (user_id, content, completed) VALUES ($1, $2, $3) \
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(user_id)
        .bind(data.content)
        .bind(data.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(todo)
    }

    async fn update_todo(&self, user_id: &str, id: Uuid, patch: UpdateTodo) -> StoreResult<Todo> {
        sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos SET \
                 content = COALESCE($3, content), \
                 completed = COALESCE($4, completed), \
                 updated_at = NOW() \
             WHERE id = $1 AND user_id = $2 \
             RETURNING {TODO_COLUMNS}"
        ))
        .bind(id)
        .bind(user_id)
        .bind(patch.content)
        .bind(patch.completed)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { entity: "todo", id })
    }

    async fn delete_todo(&self, user_id: &str, id: Uuid) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_timer_settings(&self, user_id: &str) -> StoreResult<Option<TimerSettings>> {
        let settings = sqlx::query_as::<_, TimerSettings>(&format!(
            "SELECT {TIMER_COLUMNS} FROM timer_settings WHERE user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(settings)
    }

    async fn upsert_timer_settings(
        &self,
        user_id: &str,
        input: UpsertTimerSettings,
    ) -> StoreResult<TimerSettings> {
        // NULL means "not sent": defaults on insert, the stored value on update
        let saved = sqlx::query_as::<_, TimerSettings>(&format!(
            "INSERT INTO timer_settings \
                 (user_id, work_duration, short_break_duration, long_break_duration, \
                  sessions_until_long_break) \
             VALUES ($1, COALESCE($2, $6), COALESCE($3, $7), COALESCE($4, $8), COALESCE($5, $9)) \
             ON CONFLICT (user_id) DO UPDATE SET \
                 work_duration = COALESCE($2, timer_settings.work_duration), \
                 short_break_duration = COALESCE($3, timer_settings.short_break_duration), \
                 long_break_duration = COALESCE($4, timer_settings.long_break_duration), \
                 sessions_until_long_break = \
                     COALESCE($5, timer_settings.sessions_until_long_break), \
                 updated_at = NOW() \
             RETURNING {TIMER_COLUMNS}"
        ))
        .bind(user_id)
        .bind(input.work_duration)
        .bind(input.short_break_duration)
        .bind(input.long_break_duration)
        .bind(input.sessions_until_long_break)
        .bind(DEFAULT_WORK_DURATION)
        .bind(DEFAULT_SHORT_BREAK_DURATION)
        .bind(DEFAULT_LONG_BREAK_DURATION)
        .bind(DEFAULT_SESSIONS_UNTIL_LONG_BREAK)
        .fetch_one(&self.pool)
        .await?;

        Ok(saved)
    }
}
