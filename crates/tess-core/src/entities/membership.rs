use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProjectMembership {
    pub id: String,
    pub project_id: String,
    pub member_id: String,
    pub role: Option<String>,
    pub tenant_key: Option<String>,
}
