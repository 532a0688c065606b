use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::{Entity, FieldList, InsertRow, SparseUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectType {
    Commercial,
    Residential,
    Infrastructure,
    Industrial,
    Healthcare,
}

impl ProjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Commercial => "Commercial",
            ProjectType::Residential => "Residential",
            ProjectType::Infrastructure => "Infrastructure",
            ProjectType::Industrial => "Industrial",
            ProjectType::Healthcare => "Healthcare",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectStatus {
    Active,
    Planning,
    Delayed,
    Completed,
    #[serde(rename = "On Hold")]
    OnHold,
}

impl ProjectStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Active => "Active",
            ProjectStatus::Planning => "Planning",
            ProjectStatus::Delayed => "Delayed",
            ProjectStatus::Completed => "Completed",
            ProjectStatus::OnHold => "On Hold",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectHealth {
    Good,
    #[serde(rename = "At Risk")]
    AtRisk,
    Critical,
}

impl ProjectHealth {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectHealth::Good => "Good",
            ProjectHealth::AtRisk => "At Risk",
            ProjectHealth::Critical => "Critical",
        }
    }
}

/// A construction project. `spent` may exceed `budget`; nothing enforces the
/// relationship. The rollup counters are denormalized display figures, not
/// maintained atomically with task writes.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub project_type: String,
    pub status: String,
    pub health: String,
    pub progress: i32,
    pub budget: Decimal,
    pub spent: Decimal,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager: Option<String>,
    pub image: Option<String>,
    pub team_size: i32,
    pub total_tasks: i32,
    pub completed_tasks: i32,
    pub overdue_tasks: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Project {
    const TABLE: &'static str = "projects";
    const ORDER_BY: &'static str = "created_at DESC";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProject {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Code is required"))]
    pub code: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    pub status: Option<ProjectStatus>,
    pub health: Option<ProjectHealth>,
    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100"))]
    pub progress: Option<i32>,
    pub budget: Decimal,
    pub spent: Option<Decimal>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub manager: Option<String>,
    pub image: Option<String>,
    pub team_size: Option<i32>,
    pub total_tasks: Option<i32>,
    pub completed_tasks: Option<i32>,
    pub overdue_tasks: Option<i32>,
}

impl InsertRow for CreateProject {
    fn columns() -> &'static [&'static str] {
        &[
            "name",
            "code",
            "description",
            "location",
            "type",
            "status",
            "health",
            "progress",
            "budget",
            "spent",
            "start_date",
            "end_date",
            "manager",
            "image",
            "team_size",
            "total_tasks",
            "completed_tasks",
            "overdue_tasks",
        ]
    }

    fn push_values(&self, row: &mut FieldList<'_>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.code.clone());
        row.push_bind(self.description.clone());
        row.push_bind(self.location.clone());
        row.push_bind(self.project_type.as_str().to_owned());
        row.push_bind(
            self.status
                .unwrap_or(ProjectStatus::Planning)
                .as_str()
                .to_owned(),
        );
        row.push_bind(
            self.health
                .unwrap_or(ProjectHealth::Good)
                .as_str()
                .to_owned(),
        );
        row.push_bind(self.progress.unwrap_or(0));
        row.push_bind(self.budget);
        row.push_bind(self.spent.unwrap_or_default());
        row.push_bind(self.start_date);
        row.push_bind(self.end_date);
        row.push_bind(self.manager.clone());
        row.push_bind(self.image.clone());
        row.push_bind(self.team_size.unwrap_or(0));
        row.push_bind(self.total_tasks.unwrap_or(0));
        row.push_bind(self.completed_tasks.unwrap_or(0));
        row.push_bind(self.overdue_tasks.unwrap_or(0));
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateProject {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,
    #[validate(length(min = 1, message = "Code cannot be empty"))]
    pub code: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub project_type: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    pub health: Option<ProjectHealth>,
    #[validate(range(min = 0, max = 100, message = "Progress must be between 0 and 100"))]
    pub progress: Option<i32>,
    pub budget: Option<Decimal>,
    pub spent: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub manager: Option<String>,
    pub image: Option<String>,
    pub team_size: Option<i32>,
    pub total_tasks: Option<i32>,
    pub completed_tasks: Option<i32>,
    pub overdue_tasks: Option<i32>,
}

impl SparseUpdate for UpdateProject {
    fn push_fields(&self, set: &mut FieldList<'_>) {
        if let Some(v) = &self.name {
            set.push("name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.code {
            set.push("code = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.description {
            set.push("description = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.location {
            set.push("location = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.project_type {
            set.push("type = ")
                .push_bind_unseparated(v.as_str().to_owned());
        }
        if let Some(v) = self.status {
            set.push("status = ")
                .push_bind_unseparated(v.as_str().to_owned());
        }
        if let Some(v) = self.health {
            set.push("health = ")
                .push_bind_unseparated(v.as_str().to_owned());
        }
        if let Some(v) = self.progress {
            set.push("progress = ").push_bind_unseparated(v);
        }
        if let Some(v) = self.budget {
            set.push("budget = ").push_bind_unseparated(v);
        }
        if let Some(v) = self.spent {
            set.push("spent = ").push_bind_unseparated(v);
        }
        if let Some(v) = self.start_date {
            set.push("start_date = ").push_bind_unseparated(v);
        }
        if let Some(v) = self.end_date {
            set.push("end_date = ").push_bind_unseparated(v);
        }
        if let Some(v) = &self.manager {
            set.push("manager = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.image {
            set.push("image = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.team_size {
            set.push("team_size = ").push_bind_unseparated(v);
        }
        if let Some(v) = self.total_tasks {
            set.push("total_tasks = ").push_bind_unseparated(v);
        }
        if let Some(v) = self.completed_tasks {
            set.push("completed_tasks = ").push_bind_unseparated(v);
        }
        if let Some(v) = self.overdue_tasks {
            set.push("overdue_tasks = ").push_bind_unseparated(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_labels_round_trip_through_serde() {
        let status: ProjectStatus = serde_json::from_str(r#""On Hold""#).unwrap();
        assert_eq!(status, ProjectStatus::OnHold);
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""On Hold""#);

        let health: ProjectHealth = serde_json::from_str(r#""At Risk""#).unwrap();
        assert_eq!(health.as_str(), "At Risk");
    }

    #[test]
    fn unknown_project_type_is_rejected() {
        let result: Result<ProjectType, _> = serde_json::from_str(r#""Underwater""#);
        assert!(result.is_err());
    }

    #[test]
    fn update_payload_rejects_unknown_columns() {
        let bad: Result<UpdateProject, _> =
            serde_json::from_str(r#"{"name": "A", "owner": "me"}"#);
        assert!(bad.is_err());
    }

    #[test]
    fn create_requires_iso_dates() {
        let payload = serde_json::json!({
            "name": "Tower", "code": "TWR-1", "description": "d", "location": "l",
            "type": "Commercial", "budget": 100, "start_date": "not-a-date",
            "end_date": "2026-01-01"
        });
        let result: Result<CreateProject, _> = serde_json::from_value(payload);
        assert!(result.is_err());
    }
}
