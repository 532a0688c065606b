pub mod auth;
pub mod clients;
pub mod documents;
pub mod health;
pub mod inventory;
pub mod projects;
pub mod tasks;
pub mod team;

use serde::{Deserialize, Serialize};

/// `?projectId=` filter shared by the task, team, and document list routes.
#[derive(Debug, Deserialize)]
pub struct ProjectScope {
    #[serde(rename = "projectId")]
    pub project_id: Option<String>,
}

/// Envelope payload for delete confirmations.
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}
