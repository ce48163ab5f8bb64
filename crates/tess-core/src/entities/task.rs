use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A unit of work, optionally assigned to a profile and attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: Option<String>,
    pub assignee_id: Option<String>,
    pub project_id: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub tenant_key: Option<String>,
}
