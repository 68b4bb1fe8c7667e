/// Todo model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE todos (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id TEXT NOT NULL,
///     content TEXT NOT NULL,
///     completed BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Todo {
    /// Unique todo ID
    pub id: Uuid,

    /// Owner (auth provider user ID)
    pub user_id: String,

    /// Todo text
    pub content: String,

    /// Whether the todo is done
    pub completed: bool,

    /// When the todo was created
    pub created_at: DateTime<Utc>,

    /// When the todo was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a todo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    /// Todo text
    pub content: String,

    /// Initial completion flag (default false)
    #[serde(default)]
    pub completed: bool,
}

/// Partial update for a todo
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    /// New text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// New completion flag
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Todo {
    /// Builds a new todo record owned by `user_id`
    pub fn new(user_id: &str, data: CreateTodo) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            content: data.content,
            completed: data.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update and bumps `updated_at`
    pub fn apply(&mut self, patch: UpdateTodo) {
        if let Some(content) = patch.content {
            self.content = content;
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }
}
