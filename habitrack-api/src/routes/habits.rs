/// Habit endpoints
///
/// All endpoints require a session and only ever see the caller's habits.
///
/// # Endpoints
///
/// - `GET /api/habits` - List habits
/// - `POST /api/habits` - Create habit
/// - `PATCH /api/habits/:id` - Update habit
/// - `DELETE /api/habits/:id` - Delete habit

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiJson, RecordId},
    routes::SuccessResponse,
};
use axum::{extract::State, Extension, Json};
use habitrack_shared::{
    auth::middleware::AuthContext,
    models::habit::{CreateHabit, Habit, UpdateHabit},
};

/// List the caller's habits, oldest first
///
/// # Endpoint
///
/// ```text
/// GET /api/habits
/// ```
///
/// # Response
///
/// ```json
/// [
///   {
///     "id": "uuid",
///     "user_id": "user_2abc",
///     "name": "Read",
///     "description": "20 pages",
///     "created_at": "2025-01-01T00:00:00Z",
///     "updated_at": "2025-01-01T00:00:00Z"
///   }
/// ]
/// ```
pub async fn list_habits(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Habit>>> {
    let habits = state.services.habits.list(&auth.user_id).await?;
    Ok(Json(habits))
}

/// Create a habit owned by the caller
///
/// # Request
///
/// ```json
/// { "name": "Read", "description": "20 pages" }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Missing or invalid session
/// - `500 Internal Server Error`: Malformed body or storage failure
pub async fn create_habit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateHabit>,
) -> ApiResult<Json<Habit>> {
    let habit = state.services.habits.create(&auth.user_id, req).await?;
    Ok(Json(habit))
}

/// Update a habit
///
/// Only fields present in the body change. A missing id, or one owned by
/// another user, is a 500.
pub async fn update_habit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    RecordId(id): RecordId,
    ApiJson(req): ApiJson<UpdateHabit>,
) -> ApiResult<Json<Habit>> {
    let habit = state.services.habits.update(&auth.user_id, id, req).await?;
    Ok(Json(habit))
}

/// Delete a habit
///
/// Returns `{"success": true}` whether or not a record was removed.
pub async fn delete_habit(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    RecordId(id): RecordId,
) -> ApiResult<Json<SuccessResponse>> {
    state.services.habits.delete(&auth.user_id, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
