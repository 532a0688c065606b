use axum::extract::{Path, State};
use uuid::Uuid;

use crate::database::Repository;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::Message;
use crate::middleware::authorize::{ProjectCreate, ProjectDelete, ProjectUpdate, Require};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::project::{CreateProject, Project, UpdateProject};
use crate::state::AppState;

const CODE_TAKEN: &str = "A project with this code already exists";

/// GET /api/v1/projects
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Project>> {
    let repo = Repository::<Project>::new(state.pool.clone());
    Ok(ApiResponse::success(repo.find_all().await?))
}

/// GET /api/v1/projects/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Project> {
    let repo = Repository::<Project>::new(state.pool.clone());
    let project = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;
    Ok(ApiResponse::success(project))
}

/// POST /api/v1/projects
pub async fn create(
    State(state): State<AppState>,
    _gate: Require<ProjectCreate>,
    ValidJson(payload): ValidJson<CreateProject>,
) -> ApiResult<Project> {
    let repo = Repository::<Project>::new(state.pool.clone());
    let id = Uuid::new_v4().to_string();
    let project = repo
        .create(&id, &payload)
        .await
        .map_err(|e| ApiError::on_write(e, CODE_TAKEN))?;
    Ok(ApiResponse::created(project))
}

/// PUT /api/v1/projects/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _gate: Require<ProjectUpdate>,
    ValidJson(updates): ValidJson<UpdateProject>,
) -> ApiResult<Project> {
    let repo = Repository::<Project>::new(state.pool.clone());
    let project = repo
        .update(&id, &updates)
        .await
        .map_err(|e| ApiError::on_write(e, CODE_TAKEN))?
        .ok_or_else(|| ApiError::not_found("Project not found"))?;
    Ok(ApiResponse::success(project))
}

/// DELETE /api/v1/projects/:id - the store cascades tasks and documents and
/// detaches team members.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _gate: Require<ProjectDelete>,
) -> ApiResult<Message> {
    let repo = Repository::<Project>::new(state.pool.clone());
    if !repo.delete(&id).await? {
        return Err(ApiError::not_found("Project not found"));
    }
    Ok(ApiResponse::success(Message {
        message: "Project deleted successfully",
    }))
}
