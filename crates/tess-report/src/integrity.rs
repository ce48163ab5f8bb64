//! Cross-tenant orphan scan.
//!
//! Looks for records of the checked kinds whose tenant key is null. This is
//! the only read path without a tenant filter, so it requires an
//! [`OperatorGrant`] and is meant to run against a privileged store handle.

use std::sync::Arc;

use tess_auth::OperatorGrant;
use tess_core::enums::EntityKind;
use tess_core::predicate::Predicate;
use tess_core::report::{IntegrityFindings, IntegrityReport, IntegrityViolation};
use tess_core::service::{DataService, RecordCount};
use tokio::time::Instant;

use crate::fanout::fan_out;

/// Upper bound on orphans listed per kind.
pub const SCAN_LIMIT: usize = 1_000;

pub struct IntegrityScanner<S> {
    service: Arc<S>,
    kinds: Vec<EntityKind>,
    max_concurrency: usize,
}

impl<S: DataService> IntegrityScanner<S> {
    /// Build a scanner over `kinds`. Duplicate kinds are scanned once.
    #[must_use]
    pub fn new(
        service: Arc<S>,
        grant: &OperatorGrant,
        kinds: &[EntityKind],
        max_concurrency: usize,
    ) -> Self {
        tracing::debug!(source = ?grant.source(), ?kinds, "integrity scanner enabled");
        let mut kinds = kinds.to_vec();
        kinds.sort_unstable();
        kinds.dedup();
        Self {
            service,
            kinds,
            max_concurrency,
        }
    }

    #[must_use]
    pub fn kinds(&self) -> &[EntityKind] {
        &self.kinds
    }

    /// Scan every checked kind for records without a tenant key.
    ///
    /// Each kind lists its lowest-id orphans, at most [`SCAN_LIMIT`], with
    /// the total found. A failed or late read is reported for that kind
    /// without affecting the others.
    pub async fn scan_orphans(&self, deadline: Instant) -> IntegrityFindings {
        let reads = self
            .kinds
            .iter()
            .map(|kind| (*kind, Predicate::orphaned().ordered_by_id()))
            .collect();
        let results = fan_out(
            &self.service,
            reads,
            SCAN_LIMIT,
            self.max_concurrency,
            deadline,
        )
        .await;

        results
            .into_iter()
            .map(|(kind, result)| {
                let report = match result {
                    Ok(page) => {
                        let listed = page.items.len();
                        let mut violations: Vec<IntegrityViolation> = page
                            .items
                            .iter()
                            .filter(|record| record.tenant_key().is_none())
                            .map(|record| IntegrityViolation {
                                kind,
                                id: record.id().to_string(),
                                label: record.display_label().to_string(),
                            })
                            .collect();
                        violations.sort_by(|a, b| a.id.cmp(&b.id));
                        let total = if violations.len() == listed {
                            page.count
                        } else {
                            tracing::warn!(
                                %kind,
                                dropped = listed - violations.len(),
                                "store returned scoped records to the orphan scan; dropped",
                            );
                            RecordCount::at_least(violations.len() as u64)
                        };
                        let report = IntegrityReport::scanned(total, violations);
                        if report.found() > 0 {
                            tracing::warn!(%kind, found = report.found(), "unscoped records found");
                        }
                        let unlisted = report.found() - report.violations().len() as u64;
                        if unlisted > 0 {
                            tracing::warn!(%kind, unlisted, "orphan listing truncated");
                        }
                        report
                    }
                    Err(error) => IntegrityReport::Failed { error },
                };
                (kind, report)
            })
            .collect()
    }
}
