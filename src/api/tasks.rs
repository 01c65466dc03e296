//! Task CRUD handlers.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;

use crate::codec;
use crate::task::Task;

use super::error::ApiError;
use super::json_response;
use super::routes::AppState;

/// List all tasks.
pub async fn list(State(state): State<Arc<AppState>>) -> Response {
    let tasks = state.store.list_all().await;
    json_response(StatusCode::OK, codec::render_list(&tasks))
}

/// Create a task. The title is required, non-blank after trimming;
/// `completed` defaults to false when absent.
pub async fn create(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let body = String::from_utf8_lossy(&body);
    let title = state
        .extractor
        .title(&body)
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::MissingTitle)?;
    let completed = state.extractor.completed(&body).unwrap_or(false);

    let task = Task::new(state.store.allocate_id(), title, completed);
    state.store.insert(task.clone()).await;
    tracing::debug!(id = task.id, "task created");
    Ok(json_response(StatusCode::CREATED, codec::render_task(&task)))
}

/// Update a task in place. Fields absent from the body keep their stored
/// values; a title that trims to empty is stored as-is.
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    let body = String::from_utf8_lossy(&body);
    let title = state.extractor.title(&body).map(|t| t.trim().to_string());
    let completed = state.extractor.completed(&body);

    let updated = state
        .store
        .update(id, |task| {
            if let Some(title) = title {
                task.title = title;
            }
            if let Some(completed) = completed {
                task.completed = completed;
            }
        })
        .await
        .ok_or(ApiError::NotFound)?;
    Ok(json_response(StatusCode::OK, codec::render_task(&updated)))
}

/// Delete a task.
pub async fn remove(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id = parse_id(&id)?;
    state.store.remove(id).await.ok_or(ApiError::NotFound)?;
    tracing::debug!(id, "task deleted");
    Ok(json_response(StatusCode::OK, "{\"ok\":true}".to_string()))
}

/// Method fallback for `/api/tasks`.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Method fallback for `/api/tasks/{id}`. The id check runs before the
/// method check, so a malformed id reports 400 rather than 405.
pub async fn method_not_allowed_for_id(Path(id): Path<String>) -> ApiError {
    match parse_id(&id) {
        Ok(_) => ApiError::MethodNotAllowed,
        Err(err) => err,
    }
}

/// Parse the whole path remainder after `/api/tasks/` as a base-10 id.
/// Ids are signed 32-bit on the wire: values past that width are malformed,
/// while negative values parse and fall out at the existence check instead.
pub(crate) fn parse_id(raw: &str) -> Result<u64, ApiError> {
    let id = raw.parse::<i32>().map_err(|_| ApiError::InvalidId)?;
    u64::try_from(id).map_err(|_| ApiError::NotFound)
}
