use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::{Entity, FieldList, InsertRow, SparseUpdate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    #[serde(rename = "To Do")]
    ToDo,
    #[serde(rename = "In Progress")]
    InProgress,
    Done,
    Blocked,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::ToDo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
            TaskStatus::Blocked => "Blocked",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::High => "High",
            TaskPriority::Medium => "Medium",
            TaskPriority::Low => "Low",
        }
    }
}

/// Whether the assignee is a concrete user or a free-text role slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssigneeType {
    User,
    Role,
}

impl AssigneeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssigneeType::User => "user",
            AssigneeType::Role => "role",
        }
    }
}

/// A unit of work on a project. The store cascades task deletion when the
/// owning project is removed.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub project_id: String,
    pub status: String,
    pub priority: String,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub assignee_type: String,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Task {
    const TABLE: &'static str = "tasks";
    const ORDER_BY: &'static str = "due_date ASC";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateTask {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Project id is required"))]
    pub project_id: String,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub assignee_type: Option<AssigneeType>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl InsertRow for CreateTask {
    fn columns() -> &'static [&'static str] {
        &[
            "title",
            "project_id",
            "status",
            "priority",
            "assignee_id",
            "assignee_name",
            "assignee_type",
            "due_date",
            "description",
        ]
    }

    fn push_values(&self, row: &mut FieldList<'_>) {
        row.push_bind(self.title.clone());
        row.push_bind(self.project_id.clone());
        row.push_bind(self.status.unwrap_or(TaskStatus::ToDo).as_str().to_owned());
        row.push_bind(
            self.priority
                .unwrap_or(TaskPriority::Medium)
                .as_str()
                .to_owned(),
        );
        row.push_bind(self.assignee_id.clone());
        row.push_bind(self.assignee_name.clone());
        row.push_bind(
            self.assignee_type
                .unwrap_or(AssigneeType::User)
                .as_str()
                .to_owned(),
        );
        row.push_bind(self.due_date);
        row.push_bind(self.description.clone());
    }
}

/// Sparse task update. `project_id` is mutable here (a task can be moved
/// between projects); identity is not.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateTask {
    #[serde(default)]
    pub id: Option<String>,
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    pub project_id: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub assignee_type: Option<AssigneeType>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
}

impl SparseUpdate for UpdateTask {
    fn push_fields(&self, set: &mut FieldList<'_>) {
        if let Some(v) = &self.title {
            set.push("title = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.project_id {
            set.push("project_id = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.status {
            set.push("status = ")
                .push_bind_unseparated(v.as_str().to_owned());
        }
        if let Some(v) = self.priority {
            set.push("priority = ")
                .push_bind_unseparated(v.as_str().to_owned());
        }
        if let Some(v) = &self.assignee_id {
            set.push("assignee_id = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.assignee_name {
            set.push("assignee_name = ")
                .push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.assignee_type {
            set.push("assignee_type = ")
                .push_bind_unseparated(v.as_str().to_owned());
        }
        if let Some(v) = self.due_date {
            set.push("due_date = ").push_bind_unseparated(v);
        }
        if let Some(v) = &self.description {
            set.push("description = ").push_bind_unseparated(v.clone());
        }
    }
}
