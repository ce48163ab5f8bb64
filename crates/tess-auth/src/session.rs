//! Session resolution: who is running this report?

use tess_core::identity::Principal;
use tess_core::service::DataService;

use crate::error::AuthError;

/// Resolve the principal of the active session.
///
/// Asks the store every time; nothing is cached between runs. A missing
/// session and a failed lookup are both reported as `NotAuthenticated`, and
/// nothing else in a run may proceed after either.
///
/// # Errors
///
/// Returns `AuthError::NotAuthenticated` when there is no session or the
/// session lookup fails.
pub async fn resolve_session<S: DataService>(service: &S) -> Result<Principal, AuthError> {
    match service.current_principal().await {
        Ok(Some(principal)) => {
            tracing::debug!(principal_id = %principal.id, "session resolved");
            Ok(principal)
        }
        Ok(None) => Err(AuthError::not_authenticated("no active session")),
        Err(error) => {
            tracing::debug!(%error, "session lookup failed");
            Err(AuthError::not_authenticated(format!(
                "session lookup failed: {error}"
            )))
        }
    }
}
