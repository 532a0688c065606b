use axum::extract::{Path, State};
use uuid::Uuid;

use crate::database::Repository;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::Message;
use crate::middleware::authorize::{InventoryCreate, InventoryDelete, Require};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::inventory::{CreateInventoryItem, InventoryItem, UpdateInventoryItem};
use crate::state::AppState;

const WRITE_CONFLICT: &str = "Inventory item conflicts with an existing record";

/// GET /api/v1/inventory
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<InventoryItem>> {
    let repo = Repository::<InventoryItem>::new(state.pool.clone());
    Ok(ApiResponse::success(repo.find_all().await?))
}

/// GET /api/v1/inventory/:id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<InventoryItem> {
    let repo = Repository::<InventoryItem>::new(state.pool.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Inventory item not found"))?;
    Ok(ApiResponse::success(item))
}

/// POST /api/v1/inventory
pub async fn create(
    State(state): State<AppState>,
    _gate: Require<InventoryCreate>,
    ValidJson(payload): ValidJson<CreateInventoryItem>,
) -> ApiResult<InventoryItem> {
    let repo = Repository::<InventoryItem>::new(state.pool.clone());
    let id = Uuid::new_v4().to_string();
    let item = repo
        .create(&id, &payload)
        .await
        .map_err(|e| ApiError::on_write(e, WRITE_CONFLICT))?;
    Ok(ApiResponse::created(item))
}

/// PUT /api/v1/inventory/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(updates): ValidJson<UpdateInventoryItem>,
) -> ApiResult<InventoryItem> {
    let repo = Repository::<InventoryItem>::new(state.pool.clone());
    let item = repo
        .update(&id, &updates)
        .await
        .map_err(|e| ApiError::on_write(e, WRITE_CONFLICT))?
        .ok_or_else(|| ApiError::not_found("Inventory item not found"))?;
    Ok(ApiResponse::success(item))
}

/// DELETE /api/v1/inventory/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _gate: Require<InventoryDelete>,
) -> ApiResult<Message> {
    let repo = Repository::<InventoryItem>::new(state.pool.clone());
    if !repo.delete(&id).await? {
        return Err(ApiError::not_found("Inventory item not found"));
    }
    Ok(ApiResponse::success(Message {
        message: "Inventory item deleted successfully",
    }))
}
