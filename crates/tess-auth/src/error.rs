use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("not authenticated ({reason}); sign in and set TESSERA_AUTH__ACCESS_TOKEN")]
    NotAuthenticated { reason: String },

    #[error("no profile found for principal {principal_id}")]
    ProfileNotFound { principal_id: String },

    #[error("profile of principal {principal_id} has no tenant key")]
    UnscopedPrincipal { principal_id: String },

    #[error("profile lookup failed: {0}")]
    ProfileLookup(String),

    #[error("operator access required: {0}")]
    OperatorRequired(String),

    #[error("token store error: {0}")]
    TokenStoreError(String),

    #[error("{0}")]
    Other(String),
}

impl AuthError {
    pub fn not_authenticated(reason: impl Into<String>) -> Self {
        Self::NotAuthenticated {
            reason: reason.into(),
        }
    }

    /// Whether this error happened after a principal was established, i.e. it
    /// stops tenant-scoped reads but not an independent orphan scan.
    #[must_use]
    pub const fn is_tenant_failure(&self) -> bool {
        matches!(
            self,
            Self::ProfileNotFound { .. } | Self::UnscopedPrincipal { .. } | Self::ProfileLookup(_)
        )
    }
}
