/// API route handlers
///
/// This module contains all route handlers organized by resource:
///
/// - `health`: Health check endpoint (public)
/// - `habits`: Habit CRUD endpoints
/// - `todos`: Todo CRUD endpoints
/// - `timer_settings`: Pomodoro timer settings
/// - `diagnostics`: Connection and session diagnostics
///
/// Every handler except `health` runs behind the session layer and reads the
/// caller from the `AuthContext` extension.

pub mod diagnostics;
pub mod habits;
pub mod health;
pub mod timer_settings;
pub mod todos;

use serde::{Deserialize, Serialize};

/// Response body of every delete endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}
