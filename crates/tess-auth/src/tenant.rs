//! Tenant resolution: which tenant does the principal belong to?

use tess_core::identity::{Principal, TenantKey};
use tess_core::service::DataService;

use crate::error::AuthError;

/// Derive the tenant key from the principal's profile.
///
/// The profile is looked up by id without any tenant filter, since the tenant
/// is exactly what is not yet known.
///
/// # Errors
///
/// - `AuthError::ProfileNotFound` when no profile has the principal's id.
/// - `AuthError::UnscopedPrincipal` when the profile's tenant key is null or blank.
/// - `AuthError::ProfileLookup` when the store read fails.
pub async fn resolve_tenant<S: DataService>(
    service: &S,
    principal: &Principal,
) -> Result<TenantKey, AuthError> {
    let profile = service
        .profile_by_id(&principal.id)
        .await
        .map_err(|error| {
            tracing::warn!(principal_id = %principal.id, %error, "profile lookup failed");
            AuthError::ProfileLookup(error.to_string())
        })?
        .ok_or_else(|| AuthError::ProfileNotFound {
            principal_id: principal.id.clone(),
        })?;

    let key = profile
        .tenant_key
        .and_then(|raw| TenantKey::new(raw).ok())
        .ok_or_else(|| AuthError::UnscopedPrincipal {
            principal_id: principal.id.clone(),
        })?;

    tracing::debug!(principal_id = %principal.id, tenant_key = %key, "tenant resolved");
    Ok(key)
}
