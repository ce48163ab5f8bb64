use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// The authenticated actor on whose behalf a report run executes.
///
/// Produced by the remote auth collaborator and only ever read here.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Principal {
    /// Auth user ID. Matches the `id` of the principal's profile record.
    pub id: String,
    pub email: Option<String>,
}

/// Opaque identifier scoping every tenant-owned record.
///
/// Always non-empty. Resolved once per run and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct TenantKey(String);

impl TenantKey {
    /// Wrap a raw key, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if the key is blank.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(CoreError::Validation("tenant key must not be empty".into()));
        }
        Ok(Self(raw))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
