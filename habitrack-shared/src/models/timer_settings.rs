/// Pomodoro timer settings
///
/// One record per user, written with upsert semantics only. Durations are in
/// minutes.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE timer_settings (
///     user_id TEXT PRIMARY KEY,
///     work_duration INTEGER NOT NULL DEFAULT 25,
///     short_break_duration INTEGER NOT NULL DEFAULT 5,
///     long_break_duration INTEGER NOT NULL DEFAULT 15,
///     sessions_until_long_break INTEGER NOT NULL DEFAULT 4,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Default work session length in minutes
pub const DEFAULT_WORK_DURATION: i32 = 25;

/// Default short break length in minutes
pub const DEFAULT_SHORT_BREAK_DURATION: i32 = 5;

/// Default long break length in minutes
pub const DEFAULT_LONG_BREAK_DURATION: i32 = 15;

/// Default number of work sessions before a long break
pub const DEFAULT_SESSIONS_UNTIL_LONG_BREAK: i32 = 4;

/// A user's timer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TimerSettings {
    /// Owner (auth provider user ID)
    pub user_id: String,

    /// Work session length (minutes)
    pub work_duration: i32,

    /// Short break length (minutes)
    pub short_break_duration: i32,

    /// Long break length (minutes)
    pub long_break_duration: i32,

    /// Work sessions before a long break
    pub sessions_until_long_break: i32,

    /// When the record was first written
    pub created_at: DateTime<Utc>,

    /// When the record was last written
    pub updated_at: DateTime<Utc>,
}

/// Upsert input; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpsertTimerSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_duration: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_break_duration: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub long_break_duration: Option<i32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sessions_until_long_break: Option<i32>,
}

impl TimerSettings {
    /// Default settings for a user who never saved any
    pub fn defaults_for(user_id: &str) -> Self {
        let now = Utc::now();

        Self {
            user_id: user_id.to_string(),
            work_duration: DEFAULT_WORK_DURATION,
            short_break_duration: DEFAULT_SHORT_BREAK_DURATION,
            long_break_duration: DEFAULT_LONG_BREAK_DURATION,
            sessions_until_long_break: DEFAULT_SESSIONS_UNTIL_LONG_BREAK,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges an upsert input over these settings and bumps `updated_at`
    pub fn merge(mut self, input: UpsertTimerSettings) -> Self {
        if let Some(v) = input.work_duration {
            self.work_duration = v;
        }
        if let Some(v) = input.short_break_duration {
            self.short_break_duration = v;
        }
        if let Some(v) = input.long_break_duration {
            self.long_break_duration = v;
        }
        if let Some(v) = input.sessions_until_long_break {
            self.sessions_until_long_break = v;
        }
        self.updated_at = Utc::now();
        self
    }
}
