use axum::extract::{Path, Query, State};
use uuid::Uuid;

use crate::database::Repository;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::handlers::{Message, ProjectScope};
use crate::middleware::authorize::{DocumentCreate, DocumentDelete, Require};
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::document::{CreateDocument, Document, UpdateDocument};
use crate::state::AppState;

const WRITE_CONFLICT: &str = "Document conflicts with an existing record";

/// GET /api/v1/documents[?projectId=]
pub async fn list(
    State(state): State<AppState>,
    Query(scope): Query<ProjectScope>,
) -> ApiResult<Vec<Document>> {
    let repo = Repository::<Document>::new(state.pool.clone());
    let documents = match scope.project_id {
        Some(project_id) => repo.find_many_by("project_id", &project_id).await?,
        None => repo.find_all().await?,
    };
    Ok(ApiResponse::success(documents))
}

/// GET /api/v1/documents/:id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Document> {
    let repo = Repository::<Document>::new(state.pool.clone());
    let document = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Document not found"))?;
    Ok(ApiResponse::success(document))
}

/// POST /api/v1/documents
pub async fn create(
    State(state): State<AppState>,
    _gate: Require<DocumentCreate>,
    ValidJson(payload): ValidJson<CreateDocument>,
) -> ApiResult<Document> {
    let repo = Repository::<Document>::new(state.pool.clone());
    let id = Uuid::new_v4().to_string();
    let document = repo
        .create(&id, &payload)
        .await
        .map_err(|e| ApiError::on_write(e, WRITE_CONFLICT))?;
    Ok(ApiResponse::created(document))
}

/// PUT /api/v1/documents/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidJson(updates): ValidJson<UpdateDocument>,
) -> ApiResult<Document> {
    let repo = Repository::<Document>::new(state.pool.clone());
    let document = repo
        .update(&id, &updates)
        .await
        .map_err(|e| ApiError::on_write(e, WRITE_CONFLICT))?
        .ok_or_else(|| ApiError::not_found("Document not found"))?;
    Ok(ApiResponse::success(document))
}

/// DELETE /api/v1/documents/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    _gate: Require<DocumentDelete>,
) -> ApiResult<Message> {
    let repo = Repository::<Document>::new(state.pool.clone());
    if !repo.delete(&id).await? {
        return Err(ApiError::not_found("Document not found"));
    }
    Ok(ApiResponse::success(Message {
        message: "Document deleted successfully",
    }))
}
