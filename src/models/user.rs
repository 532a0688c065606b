use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::auth::Role;
use crate::database::{Entity, FieldList, InsertRow, SparseUpdate};

/// Stored user identity. The password digest never appears in a response;
/// it is skipped at serialization and only read inside the auth handlers.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: String,
    pub company_id: Option<String>,
    pub avatar_initials: Option<String>,
    pub avatar_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for User {
    const TABLE: &'static str = "users";
    const ORDER_BY: &'static str = "created_at DESC";
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    pub phone: Option<String>,
    pub role: Option<Role>,
    pub company_id: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Insert payload assembled by the register handler: digest and initials are
/// derived server-side, never taken from the request.
#[derive(Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub role: Role,
    pub company_id: Option<String>,
    pub avatar_initials: String,
}

impl InsertRow for NewUser {
    fn columns() -> &'static [&'static str] {
        &[
            "name",
            "email",
            "password_hash",
            "phone",
            "role",
            "company_id",
            "avatar_initials",
        ]
    }

    fn push_values(&self, row: &mut FieldList<'_>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.email.clone());
        row.push_bind(self.password_hash.clone());
        row.push_bind(self.phone.clone());
        row.push_bind(self.role.as_str().to_owned());
        row.push_bind(self.company_id.clone());
        row.push_bind(self.avatar_initials.clone());
    }
}

/// Profile self-service: only name and phone are mutable. Anything else in
/// the body is rejected, except `id`, which is tolerated and ignored.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProfile {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub phone: Option<String>,
}

impl SparseUpdate for UpdateProfile {
    fn push_fields(&self, set: &mut FieldList<'_>) {
        if let Some(v) = &self.name {
            set.push("name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.phone {
            set.push("phone = ").push_bind_unseparated(v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        User {
            id: "u-1".to_string(),
            name: "Ann Lee".to_string(),
            email: "ann@x.com".to_string(),
            password_hash: "$2b$12$abcdefgh".to_string(),
            phone: None,
            role: "operative".to_string(),
            company_id: None,
            avatar_initials: Some("AL".to_string()),
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn password_digest_is_never_serialized() {
        let value = serde_json::to_value(sample_user()).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["email"], "ann@x.com");
    }

    #[test]
    fn profile_update_rejects_unknown_fields_but_tolerates_id() {
        let ok: Result<UpdateProfile, _> =
            serde_json::from_str(r#"{"id": "other", "name": "Ann"}"#);
        assert!(ok.is_ok());

        let bad: Result<UpdateProfile, _> = serde_json::from_str(r#"{"role": "super_admin"}"#);
        assert!(bad.is_err());
    }
}
