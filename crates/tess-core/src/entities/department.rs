use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Department {
    pub id: String,
    pub name: String,
    pub manager_id: Option<String>,
    pub tenant_key: Option<String>,
}
