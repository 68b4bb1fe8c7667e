/// Pomodoro timer settings endpoints
///
/// One settings record per user. Reading before anything was saved returns
/// the defaults (25/5/15 minutes, long break every 4 sessions) without
/// storing them.
///
/// # Endpoints
///
/// - `GET /api/timer-settings` - Current settings
/// - `POST /api/timer-settings` - Create or update settings

use crate::{app::AppState, error::ApiResult, extract::ApiJson};
use axum::{extract::State, Extension, Json};
use habitrack_shared::{
    auth::middleware::AuthContext,
    models::timer_settings::{TimerSettings, UpsertTimerSettings},
};

pub async fn get_timer_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<TimerSettings>> {
    Ok(Json(state.services.timer.get(&auth.user_id).await?))
}

/// Create or update the caller's settings
///
/// # Request
///
/// ```json
/// {
///   "work_duration": 50,
///   "short_break_duration": 10,
///   "long_break_duration": 30,
///   "sessions_until_long_break": 3
/// }
/// ```
///
/// Omitted fields keep their current (or default) value. Repeated calls
/// update the same record.
pub async fn upsert_timer_settings(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<UpsertTimerSettings>,
) -> ApiResult<Json<TimerSettings>> {
    Ok(Json(state.services.timer.upsert(&auth.user_id, req).await?))
}
