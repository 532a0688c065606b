use axum::{extract::State, Extension};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{self, Claims, Role};
use crate::database::Repository;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::{ApiResponse, ApiResult};
use crate::models::user::{LoginRequest, NewUser, RegisterRequest, UpdateProfile, User};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AuthPayload {
    pub user: User,
    pub token: String,
}

/// POST /api/v1/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<RegisterRequest>,
) -> ApiResult<AuthPayload> {
    let repo = Repository::<User>::new(state.pool.clone());

    if repo.find_one_by("email", &payload.email).await?.is_some() {
        return Err(ApiError::conflict("Email already registered"));
    }

    let password_hash = auth::hash_password(payload.password).await?;
    let new_user = NewUser {
        avatar_initials: auth::avatar_initials(&payload.name),
        name: payload.name,
        email: payload.email,
        password_hash,
        phone: payload.phone,
        role: payload.role.unwrap_or(Role::Operative),
        company_id: payload.company_id,
    };

    // The unique index still backs the precheck against a concurrent
    // registration with the same email.
    let id = Uuid::new_v4().to_string();
    let user = repo
        .create(&id, &new_user)
        .await
        .map_err(|e| ApiError::on_write(e, "Email already registered"))?;

    let token = issue_token(&user, &state)?;
    Ok(ApiResponse::created(AuthPayload { user, token }))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<LoginRequest>,
) -> ApiResult<AuthPayload> {
    let repo = Repository::<User>::new(state.pool.clone());

    // Unknown email and digest mismatch are indistinguishable to the caller.
    let user = repo
        .find_one_by("email", &payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let valid = auth::verify_password(payload.password, user.password_hash.clone()).await?;
    if !valid {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    let token = issue_token(&user, &state)?;
    Ok(ApiResponse::success(AuthPayload { user, token }))
}

/// GET /api/v1/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
) -> ApiResult<User> {
    let repo = Repository::<User>::new(state.pool.clone());
    let user = repo
        .find_by_id(&caller.id)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(ApiResponse::success(user))
}

/// PUT /api/v1/auth/profile - partial name/phone update for the caller.
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthUser>,
    ValidJson(updates): ValidJson<UpdateProfile>,
) -> ApiResult<User> {
    let repo = Repository::<User>::new(state.pool.clone());
    let user = repo
        .update(&caller.id, &updates)
        .await?
        .ok_or_else(|| ApiError::not_found("User not found"))?;
    Ok(ApiResponse::success(user))
}

fn issue_token(user: &User, state: &AppState) -> Result<String, ApiError> {
    let role = Role::parse_or_lowest(&user.role);
    let claims = Claims::new(
        &user.id,
        &user.email,
        role,
        state.config.security.jwt_expiry_days,
    );
    auth::generate_token(&claims, &state.config.security)
}
