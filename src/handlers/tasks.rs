use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::database::Repository;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::{Message, ProjectScope};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::state::AppState;

const WRITE_CONFLICT: &str = "Task conflicts with an existing record";

/// GET /api/v1/tasks[?projectId=]
pub async fn list(
    State(state): State<AppState>,
    Query(scope): Query<ProjectScope>,
) -> ApiResult<Vec<Task>> {
    let repo = Repository::<Task>::new(state.pool.clone());
    let tasks = match scope.project_id {
        Some(project_id) => repo.find_many_by("project_id", &project_id).await?,
        None => repo.find_all().await?,
    };
    Ok(ApiResponse::success(tasks))
}

/// GET /api/v1/tasks/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Task> {
    let repo = Repository::<Task>::new(state.pool.clone());
    let task = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;
    Ok(ApiResponse::success(task))
}

/// POST /api/v1/tasks - any authenticated identity may create tasks; there
/// is no role gate on task mutations (see DESIGN.md).
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateTask>,
) -> ApiResult<Task> {
    let repo = Repository::<Task>::new(state.pool.clone());
    let id = Uuid::new_v4().to_string();
    let task = repo
        .create(&id, &payload)
        .await
        .map_err(|e| ApiError::on_write(e, WRITE_CONFLICT))?;
    Ok(ApiResponse::created(task))
}

/// PUT /api/v1/tasks/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(updates): ValidJson<UpdateTask>,
) -> ApiResult<Task> {
    let repo = Repository::<Task>::new(state.pool.clone());
    let task = repo
        .update(&id, &updates)
        .await
        .map_err(|e| ApiError::on_write(e, WRITE_CONFLICT))?
        .ok_or_else(|| ApiError::not_found("Task not found"))?;
    Ok(ApiResponse::success(task))
}

/// DELETE /api/v1/tasks/:id
pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Message> {
    let repo = Repository::<Task>::new(state.pool.clone());
    if !repo.delete(&id).await? {
        return Err(ApiError::not_found("Task not found"));
    }
    Ok(ApiResponse::success(Message {
        message: "Task deleted successfully",
    }))
}
