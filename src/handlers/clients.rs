use axum::extract::{Path, State};
use uuid::Uuid;

use crate::database::Repository;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::Message;
use crate::middleware::authorize::{ClientCreate, ClientDelete, Require};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::client::{Client, CreateClient, UpdateClient};
use crate::state::AppState;

const WRITE_CONFLICT: &str = "Client conflicts with an existing record";

/// GET /api/v1/clients
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Client>> {
    let repo = Repository::<Client>::new(state.pool.clone());
    Ok(ApiResponse::success(repo.find_all().await?))
}

/// GET /api/v1/clients/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Client> {
    let repo = Repository::<Client>::new(state.pool.clone());
    let client = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Client not found"))?;
    Ok(ApiResponse::success(client))
}

/// POST /api/v1/clients
pub async fn create(
    State(state): State<AppState>,
    _gate: Require<ClientCreate>,
    ValidJson(payload): ValidJson<CreateClient>,
) -> ApiResult<Client> {
    let repo = Repository::<Client>::new(state.pool.clone());
    let id = Uuid::new_v4().to_string();
    let client = repo
        .create(&id, &payload)
        .await
        .map_err(|e| ApiError::on_write(e, WRITE_CONFLICT))?;
    Ok(ApiResponse::created(client))
}

/// PUT /api/v1/clients/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(updates): ValidJson<UpdateClient>,
) -> ApiResult<Client> {
    let repo = Repository::<Client>::new(state.pool.clone());
    let client = repo
        .update(&id, &updates)
        .await
        .map_err(|e| ApiError::on_write(e, WRITE_CONFLICT))?
        .ok_or_else(|| ApiError::not_found("Client not found"))?;
    Ok(ApiResponse::success(client))
}

/// DELETE /api/v1/clients/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _gate: Require<ClientDelete>,
) -> ApiResult<Message> {
    let repo = Repository::<Client>::new(state.pool.clone());
    if !repo.delete(&id).await? {
        return Err(ApiError::not_found("Client not found"));
    }
    Ok(ApiResponse::success(Message {
        message: "Client deleted successfully",
    }))
}
