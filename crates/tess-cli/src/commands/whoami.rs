use serde::Serialize;
use tess_auth::{resolve_session, resolve_tenant};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct WhoamiResponse {
    principal_id: String,
    email: Option<String>,
    tenant_key: Option<String>,
    backend: &'static str,
    token_source: Option<String>,
    note: Option<String>,
}

/// Handle `tess whoami`.
///
/// A missing session is an error. A principal without a usable tenant is
/// reported with a note instead, since that is what this command diagnoses.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let store = ctx.session_store()?;
    let timeout = ctx.config.report.run_timeout();

    let principal = tokio::time::timeout(timeout, resolve_session(&*store))
        .await
        .map_err(|_| anyhow::anyhow!("session lookup timed out after {timeout:?}"))??;

    let (tenant_key, note) =
        match tokio::time::timeout(timeout, resolve_tenant(&*store, &principal)).await {
            Ok(Ok(key)) => (Some(key.to_string()), None),
            Ok(Err(error)) if error.is_tenant_failure() => (None, Some(error.to_string())),
            Ok(Err(error)) => return Err(error.into()),
            Err(_) => (None, Some("profile lookup timed out".to_string())),
        };

    let response = WhoamiResponse {
        principal_id: principal.id,
        email: principal.email,
        tenant_key,
        backend: ctx.backend_label(),
        token_source: ctx.token_source().map(|source| source.to_string()),
        note,
    };

    output(&response, flags.format)
}
