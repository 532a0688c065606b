use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::database::{Entity, FieldList, InsertRow, SparseUpdate};

/// A project document. `url` is an opaque string; there is no file storage
/// behind it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Document {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub doc_type: String,
    pub project_id: String,
    pub size: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: String,
    pub url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Document {
    const TABLE: &'static str = "documents";
    const ORDER_BY: &'static str = "created_at DESC";
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDocument {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, message = "Type is required"))]
    pub doc_type: String,
    #[validate(length(min = 1, message = "Project id is required"))]
    pub project_id: String,
    pub size: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub url: Option<String>,
}

impl InsertRow for CreateDocument {
    fn columns() -> &'static [&'static str] {
        &["name", "type", "project_id", "size", "date", "status", "url"]
    }

    fn push_values(&self, row: &mut FieldList<'_>) {
        row.push_bind(self.name.clone());
        row.push_bind(self.doc_type.clone());
        row.push_bind(self.project_id.clone());
        row.push_bind(self.size.clone());
        row.push_bind(self.date);
        row.push_bind(self.status.clone().unwrap_or_else(|| "Draft".to_string()));
        row.push_bind(self.url.clone());
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateDocument {
    #[serde(default)]
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub doc_type: Option<String>,
    pub project_id: Option<String>,
    pub size: Option<String>,
    pub date: Option<NaiveDate>,
    pub status: Option<String>,
    pub url: Option<String>,
}

impl SparseUpdate for UpdateDocument {
    fn push_fields(&self, set: &mut FieldList<'_>) {
        if let Some(v) = &self.name {
            set.push("name = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.doc_type {
            set.push("type = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.project_id {
            set.push("project_id = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.size {
            set.push("size = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = self.date {
            set.push("date = ").push_bind_unseparated(v);
        }
        if let Some(v) = &self.status {
            set.push("status = ").push_bind_unseparated(v.clone());
        }
        if let Some(v) = &self.url {
            set.push("url = ").push_bind_unseparated(v.clone());
        }
    }
}
