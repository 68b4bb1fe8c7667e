/// Todo endpoints
///
/// # Endpoints
///
/// - `GET /api/todos` - List todos
/// - `POST /api/todos` - Create todo
/// - `PATCH /api/todos/:id` - Update todo
/// - `DELETE /api/todos/:id` - Delete todo

use crate::{
    app::AppState,
    error::ApiResult,
    extract::{ApiJson, RecordId},
    routes::SuccessResponse,
};
use axum::{extract::State, Extension, Json};
use habitrack_shared::{
    auth::middleware::AuthContext,
    models::todo::{CreateTodo, Todo, UpdateTodo},
};

/// List the caller's todos, oldest first
pub async fn list_todos(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<Vec<Todo>>> {
    Ok(Json(state.services.todos.list(&auth.user_id).await?))
}

/// Create a todo
///
/// # Request
///
/// ```json
/// { "content": "Buy milk", "completed": false }
/// ```
///
/// `completed` defaults to `false`.
pub async fn create_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    ApiJson(req): ApiJson<CreateTodo>,
) -> ApiResult<Json<Todo>> {
    Ok(Json(state.services.todos.create(&auth.user_id, req).await?))
}

/// Update a todo's content and/or completion flag
pub async fn update_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    RecordId(id): RecordId,
    ApiJson(req): ApiJson<UpdateTodo>,
) -> ApiResult<Json<Todo>> {
    Ok(Json(state.services.todos.update(&auth.user_id, id, req).await?))
}

pub async fn delete_todo(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    RecordId(id): RecordId,
) -> ApiResult<Json<SuccessResponse>> {
    state.services.todos.delete(&auth.user_id, id).await?;
    Ok(Json(SuccessResponse::ok()))
}
