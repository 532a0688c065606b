use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::SecurityConfig;
use crate::error::ApiError;

/// Access tiers, lowest privilege last. Stored as snake_case text in the
/// users table and carried verbatim inside token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    SuperAdmin,
    CompanyAdmin,
    Supervisor,
    Operative,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::CompanyAdmin => "company_admin",
            Role::Supervisor => "supervisor",
            Role::Operative => "operative",
        }
    }

    /// Parse a stored role string. Unknown values fall back to the lowest
    /// privilege tier rather than failing the request.
    pub fn parse_or_lowest(s: &str) -> Role {
        match s {
            "super_admin" => Role::SuperAdmin,
            "company_admin" => Role::CompanyAdmin,
            "supervisor" => Role::Supervisor,
            _ => Role::Operative,
        }
    }
}

/// Decoded bearer token payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: &str, email: &str, role: Role, expiry_days: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::days(expiry_days)).timestamp(),
        }
    }
}

pub fn generate_token(claims: &Claims, security: &SecurityConfig) -> Result<String, ApiError> {
    let key = EncodingKey::from_secret(security.jwt_secret.as_bytes());
    encode(&Header::default(), claims, &key)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("token generation failed: {}", e)))
}

pub fn validate_token(token: &str, security: &SecurityConfig) -> Result<Claims, ApiError> {
    let key = DecodingKey::from_secret(security.jwt_secret.as_bytes());
    let data = decode::<Claims>(token, &key, &Validation::default())
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
    Ok(data.claims)
}

/// First letter of each of the first two whitespace-separated name tokens,
/// uppercased: "Ann Lee" -> "AL", "cher" -> "C".
pub fn avatar_initials(name: &str) -> String {
    let initials: String = name
        .split_whitespace()
        .filter_map(|token| token.chars().next())
        .take(2)
        .collect();
    initials.to_uppercase()
}

/// bcrypt is CPU-bound; both digest operations run on the blocking pool so
/// they do not stall the async workers.
pub async fn hash_password(plain: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, bcrypt::DEFAULT_COST))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("hashing task failed: {}", e)))?
        .map_err(ApiError::from)
}

pub async fn verify_password(plain: String, digest: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(plain, &digest))
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("verify task failed: {}", e)))?
        .map_err(ApiError::from)
}
