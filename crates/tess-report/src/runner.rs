//! One report run, end to end.
//!
//! ```text
//! resolve_session ─┬─ resolve_tenant ─ run_scoped ─┐
//!                  └─ scan_orphans (optional) ─────┴─ assemble
//! ```
//!
//! The two branches run concurrently and independently: a tenant failure
//! stops the scoped reads but not the orphan scan, whose findings travel with
//! the error.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tess_auth::{AuthError, resolve_session, resolve_tenant};
use tess_config::ReportConfig;
use tess_core::enums::EntityKind;
use tess_core::report::{AggregationReport, IntegrityFindings};
use tess_core::service::DataService;
use thiserror::Error;
use tokio::time::Instant;

use crate::assemble::assemble;
use crate::engine::ScopedQueryEngine;
use crate::integrity::IntegrityScanner;

/// Fatal outcomes of a run. Per-kind failures are never fatal; they live in
/// the report.
#[derive(Debug, Error)]
pub enum RunError {
    /// No principal could be resolved. Nothing was queried.
    #[error(transparent)]
    Session(AuthError),

    /// The principal has no usable tenant. No scoped read ran.
    #[error("tenant resolution failed")]
    Tenant {
        source: AuthError,
        /// Findings of the orphan scan, when one was attached to the run.
        integrity: Option<IntegrityFindings>,
    },

    /// An integrity-only run was requested without a scanner.
    #[error("no integrity scanner attached to this run")]
    ScannerMissing,
}

impl RunError {
    /// Orphan scan findings produced before the run failed, if any.
    #[must_use]
    pub const fn integrity(&self) -> Option<&IntegrityFindings> {
        match self {
            Self::Tenant { integrity, .. } => integrity.as_ref(),
            Self::Session(_) | Self::ScannerMissing => None,
        }
    }
}

pub struct ReportRunner<S, P = S> {
    engine: ScopedQueryEngine<S>,
    service: Arc<S>,
    scanner: Option<IntegrityScanner<P>>,
    kinds: Vec<EntityKind>,
    run_timeout: Duration,
}

impl<S: DataService> ReportRunner<S, S> {
    /// A runner over every kind, without an integrity scan.
    #[must_use]
    pub fn new(service: Arc<S>, config: &ReportConfig) -> Self {
        Self {
            engine: ScopedQueryEngine::new(Arc::clone(&service), config.max_concurrency),
            service,
            scanner: None,
            kinds: EntityKind::ALL.to_vec(),
            run_timeout: config.run_timeout(),
        }
    }
}

impl<S: DataService, P: DataService> ReportRunner<S, P> {
    /// Restrict the scoped reads to `kinds`.
    #[must_use]
    pub fn with_kinds(mut self, kinds: Vec<EntityKind>) -> Self {
        self.kinds = kinds;
        self
    }

    /// Attach an orphan scan to every run.
    #[must_use]
    pub fn with_integrity<Q: DataService>(self, scanner: IntegrityScanner<Q>) -> ReportRunner<S, Q> {
        ReportRunner {
            engine: self.engine,
            service: self.service,
            scanner: Some(scanner),
            kinds: self.kinds,
            run_timeout: self.run_timeout,
        }
    }

    /// Execute one run.
    ///
    /// # Errors
    ///
    /// - `RunError::Session` when no principal is signed in.
    /// - `RunError::Tenant` when the principal's tenant cannot be resolved,
    ///   carrying any orphan scan findings.
    pub async fn run(&self) -> Result<AggregationReport, RunError> {
        let run_date = Utc::now().date_naive();
        let deadline = Instant::now() + self.run_timeout;
        tracing::info!(%run_date, kinds = self.kinds.len(), "report run started");

        let principal = tokio::time::timeout_at(deadline, resolve_session(&*self.service))
            .await
            .unwrap_or_else(|_| Err(AuthError::not_authenticated("session lookup timed out")))
            .map_err(RunError::Session)?;

        let scoped = async {
            let tenant = tokio::time::timeout_at(deadline, resolve_tenant(&*self.service, &principal))
                .await
                .unwrap_or_else(|_| Err(AuthError::ProfileLookup("profile lookup timed out".into())))?;
            let results = self
                .engine
                .run_scoped(&tenant, &self.kinds, run_date, deadline)
                .await;
            Ok::<_, AuthError>((tenant, results))
        };
        let integrity = async {
            match &self.scanner {
                Some(scanner) => Some(scanner.scan_orphans(deadline).await),
                None => None,
            }
        };

        let (scoped, integrity) = tokio::join!(scoped, integrity);
        match scoped {
            Ok((tenant, results)) => {
                let report = assemble(tenant, principal, run_date, Utc::now(), results, integrity);
                tracing::info!(
                    degraded = ?report.degraded_kinds(),
                    violations = report.violation_count(),
                    "report run finished",
                );
                Ok(report)
            }
            Err(source) => {
                tracing::warn!(%source, "tenant resolution failed; no scoped reads ran");
                Err(RunError::Tenant { source, integrity })
            }
        }
    }

    /// Run only the orphan scan, without a session or tenant.
    ///
    /// # Errors
    ///
    /// Returns `RunError::ScannerMissing` if no scanner is attached.
    pub async fn run_integrity_only(&self) -> Result<IntegrityFindings, RunError> {
        let scanner = self.scanner.as_ref().ok_or(RunError::ScannerMissing)?;
        let deadline = Instant::now() + self.run_timeout;
        Ok(scanner.scan_orphans(deadline).await)
    }
}
