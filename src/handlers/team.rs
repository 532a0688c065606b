use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::database::Repository;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::{Message, ProjectScope};
use crate::middleware::authorize::{Require, TeamCreate, TeamDelete};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::team_member::{CreateTeamMember, TeamMember, UpdateTeamMember};
use crate::state::AppState;

const EMAIL_TAKEN: &str = "A team member with this email already exists";

/// GET /api/v1/team[?projectId=]
pub async fn list(
    State(state): State<AppState>,
    Query(scope): Query<ProjectScope>,
) -> ApiResult<Vec<TeamMember>> {
    let repo = Repository::<TeamMember>::new(state.pool.clone());
    let members = match scope.project_id {
        Some(project_id) => repo.find_many_by("project_id", &project_id).await?,
        None => repo.find_all().await?,
    };
    Ok(ApiResponse::success(members))
}

/// GET /api/v1/team/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<TeamMember> {
    let repo = Repository::<TeamMember>::new(state.pool.clone());
    let member = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Team member not found"))?;
    Ok(ApiResponse::success(member))
}

/// POST /api/v1/team
pub async fn create(
    State(state): State<AppState>,
    _gate: Require<TeamCreate>,
    ValidJson(payload): ValidJson<CreateTeamMember>,
) -> ApiResult<TeamMember> {
    let repo = Repository::<TeamMember>::new(state.pool.clone());
    let id = Uuid::new_v4().to_string();
    let member = repo
        .create(&id, &payload)
        .await
        .map_err(|e| ApiError::on_write(e, EMAIL_TAKEN))?;
    Ok(ApiResponse::created(member))
}

/// PUT /api/v1/team/:id - any authenticated identity. Create and delete are
/// admin-gated, update is not; see the authorization table.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(updates): ValidJson<UpdateTeamMember>,
) -> ApiResult<TeamMember> {
    let repo = Repository::<TeamMember>::new(state.pool.clone());
    let member = repo
        .update(&id, &updates)
        .await
        .map_err(|e| ApiError::on_write(e, EMAIL_TAKEN))?
        .ok_or_else(|| ApiError::not_found("Team member not found"))?;
    Ok(ApiResponse::success(member))
}

/// DELETE /api/v1/team/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _gate: Require<TeamDelete>,
) -> ApiResult<Message> {
    let repo = Repository::<TeamMember>::new(state.pool.clone());
    if !repo.delete(&id).await? {
        return Err(ApiError::not_found("Team member not found"));
    }
    Ok(ApiResponse::success(Message {
        message: "Team member deleted successfully",
    }))
}
