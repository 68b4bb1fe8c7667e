/// Habit model
///
/// # Schema
///
/// ```sql
/// CREATE TABLE habits (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id TEXT NOT NULL,
///     name TEXT NOT NULL,
///     description TEXT,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::deserialize_some;

/// A habit the user is tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Habit {
    /// Unique habit ID
    pub id: Uuid,

    /// Owner (auth provider user ID)
    pub user_id: String,

    /// Habit name
    pub name: String,

    /// Optional free-form description
    pub description: Option<String>,

    /// When the habit was created
    pub created_at: DateTime<Utc>,

    /// When the habit was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a habit
///
/// The owner is never taken from the body; it comes from the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateHabit {
    /// Habit name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for a habit
///
/// Only fields present in the body are changed. `"description": null`
/// clears the description.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateHabit {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description (`Some(None)` clears it)
    #[serde(
        default,
        deserialize_with = "deserialize_some",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
}

impl Habit {
    /// Builds a new habit record owned by `user_id`
    pub fn new(user_id: &str, data: CreateHabit) -> Self {
        let now = Utc::now();

        Self {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            name: data.name,
            description: data.description,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update and bumps `updated_at`
    pub fn apply(&mut self, patch: UpdateHabit) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        self.updated_at = Utc::now();
    }
}
