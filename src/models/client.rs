use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::{Entity, FieldList, InsertRow, SparseUpdate};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Client {
    pub id: String,
    pub name: String,
    pub contact_person: Option<String>,
    pub role: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: String,
    pub tier: Option<String>,
    pub active_projects: i32,
    pub total_value: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Client {
    const TABLE: &'static str = "clients";
    const ORDER_BY: &'static str = "name ASC";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClient {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub contact_person: Option<String>,
    pub role: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub tier: Option<String>,
    pub active_projects: Option<i32>,
    pub total_value: Option<String>,
}

impl InsertRow for CreateClient {
    fn columns() -> &'static [&'static str] {
        &[
            "name",
            "contact_person",
            "role",
            "email",
            "phone",
            "status",
            "tier",
            "active_projects",
            "total_value",
        ]
    }

    fn push_values(&self, row: &mut FieldList<'_>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.contact_person.clone());
        row.push_bind(self.role.clone());
        row.push_bind(self.email.clone());
        row.push_bind(self.phone.clone());
        row.push_bind(self.status.clone().unwrap_or_else(|| "Lead".to_string()));
        row.push_bind(self.tier.clone());
        row.push_bind(self.active_projects.unwrap_or(0));
        row.push_bind(self.total_value.clone());
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateClient {
    #[serde(default)]
    pub id: Option<String>,
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub role: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: Option<String>,
    pub tier: Option<String>,
    pub active_projects: Option<i32>,
    pub total_value: Option<String>,
}

impl SparseUpdate for UpdateClient {
    fn push_fields(&self, set: &mut FieldList<'_>) {
        if let Some(v) = &self.name {
            set.push("name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.contact_person {
            set.push("contact_person = ")
                .push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.role {
            set.push("role = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.email {
            set.push("email = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.phone {
            set.push("phone = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.status {
            set.push("status = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.tier {
            set.push("tier = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.active_projects {
            set.push("active_projects = ").push_bind_unseparated(v);
        }
        if let Some(v) = &self.total_value {
            set.push("total_value = ").push_bind_unseparated(v.clone());
        }
    }
}
