use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::{Entity, FieldList, InsertRow, SparseUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    #[serde(rename = "On Site")]
    OnSite,
    #[serde(rename = "Off Site")]
    OffSite,
    #[serde(rename = "On Break")]
    OnBreak,
    Leave,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::OnSite => "On Site",
            MemberStatus::OffSite => "Off Site",
            MemberStatus::OnBreak => "On Break",
            MemberStatus::Leave => "Leave",
        }
    }
}

/// A crew member. `project_id` is nullable: deleting a project detaches the
/// member (store-level SET NULL), it never removes them.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub initials: String,
    pub role: String,
    pub status: String,
    pub project_id: Option<String>,
    pub phone: String,
    pub email: String,
    pub color: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for TeamMember {
    const TABLE: &'static str = "team_members";
    const ORDER_BY: &'static str = "name ASC";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTeamMember {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Initials are required"))]
    pub initials: String,
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
    pub status: MemberStatus,
    pub project_id: Option<String>,
    #[validate(length(min = 1, message = "Phone is required"))]
    pub phone: String,
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Color is required"))]
    pub color: String,
}

impl InsertRow for CreateTeamMember {
    fn columns() -> &'static [&'static str] {
        &[
            "name", "initials", "role", "status", "project_id", "phone", "email", "color",
        ]
    }

    fn push_values(&self, row: &mut FieldList<'_>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.initials.clone());
        row.push_bind(self.role.clone());
        row.push_bind(self.status.as_str().to_owned());
        row.push_bind(self.project_id.clone());
        row.push_bind(self.phone.clone());
        row.push_bind(self.email.clone());
        row.push_bind(self.color.clone());
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateTeamMember {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    pub initials: Option<String>,
    pub role: Option<String>,
    pub status: Option<MemberStatus>,
    pub project_id: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "A valid email is required"))]
    pub email: Option<String>,
    pub color: Option<String>,
}

impl SparseUpdate for UpdateTeamMember {
    fn push_fields(&self, set: &mut FieldList<'_>) {
        if let Some(v) = &self.name {
            set.push("name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.initials {
            set.push("initials = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.role {
            set.push("role = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.status {
            set.push("status = ")
                .push_bind_unseparated(v.as_str().to_owned());
        }
        if let Some(v) = &self.project_id {
            set.push("project_id = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.phone {
            set.push("phone = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.email {
            set.push("email = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.color {
            set.push("color = ").push_bind_unseparated(v.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_status_uses_display_labels() {
        let status: MemberStatus = serde_json::from_str(r#""On Break""#).unwrap();
        assert_eq!(status, MemberStatus::OnBreak);
        assert!(serde_json::from_str::<MemberStatus>(r#""on break""#).is_err());
    }

    #[test]
    fn create_requires_status_and_color() {
        let missing_status = serde_json::json!({
            "name": "Ann Lee", "initials": "AL", "role": "Foreman",
            "phone": "0700", "email": "ann@x.com", "color": "teal"
        });
        assert!(serde_json::from_value::<CreateTeamMember>(missing_status).is_err());

        let blank_color = serde_json::json!({
            "name": "Ann Lee", "initials": "AL", "role": "Foreman",
            "status": "On Site", "phone": "0700", "email": "ann@x.com",
            "color": ""
        });
        let member: CreateTeamMember = serde_json::from_value(blank_color).unwrap();
        assert!(validator::Validate::validate(&member).is_err());
    }
}
