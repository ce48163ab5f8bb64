//! Operator gating for the unscoped integrity scan.
//!
//! The orphan scan reads across every tenant, so it needs a privileged store
//! handle. An [`OperatorGrant`] is the proof that such a handle was obtained
//! legitimately; the scanner cannot be built without one.

use tess_config::StoreConfig;

use crate::error::AuthError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrantSource {
    /// A configured service key for the remote store.
    ServiceKey,
    /// An offline fixture store, which has no tenants to protect.
    LocalFixture,
}

/// Authorization to run reads without a tenant filter.
#[derive(Debug, Clone)]
pub struct OperatorGrant {
    source: GrantSource,
}

impl OperatorGrant {
    /// Grant operator access when the store has a service key configured.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::OperatorRequired` if `store.service_key` is empty.
    pub fn from_store_config(config: &StoreConfig) -> Result<Self, AuthError> {
        if !config.has_service_key() {
            return Err(AuthError::OperatorRequired(
                "store.service_key is not configured (set TESSERA_STORE__SERVICE_KEY)".into(),
            ));
        }
        tracing::info!("operator grant issued from service key");
        Ok(Self {
            source: GrantSource::ServiceKey,
        })
    }

    /// Grant operator access over a local fixture.
    #[must_use]
    pub const fn local_fixture() -> Self {
        Self {
            source: GrantSource::LocalFixture,
        }
    }

    #[must_use]
    pub const fn source(&self) -> GrantSource {
        self.source
    }
}
