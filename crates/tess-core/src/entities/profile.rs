use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A user's profile record. `tenant_key` is nullable in storage but required
/// for the profile to take part in any tenant-scoped read.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Profile {
    pub id: String,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
    pub tenant_key: Option<String>,
}
