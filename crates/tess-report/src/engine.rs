//! Tenant-scoped reads across entity kinds.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tess_core::enums::EntityKind;
use tess_core::identity::TenantKey;
use tess_core::predicate::Predicate;
use tess_core::report::SAMPLE_LIMIT;
use tess_core::service::{DataService, RecordCount};
use tokio::time::Instant;

use crate::fanout::{ReadResults, fan_out};

/// Fans out one scoped read per kind against a shared store.
///
/// The only entry point takes a resolved [`TenantKey`], so no scoped read can
/// be issued before tenant resolution succeeds.
pub struct ScopedQueryEngine<S> {
    service: Arc<S>,
    max_concurrency: usize,
}

impl<S: DataService> ScopedQueryEngine<S> {
    #[must_use]
    pub const fn new(service: Arc<S>, max_concurrency: usize) -> Self {
        Self {
            service,
            max_concurrency,
        }
    }

    /// Read a sample and count of every requested kind owned by `tenant`.
    ///
    /// Kinds are deduplicated; the result has exactly one entry per distinct
    /// kind, in enumeration order. Date-filtered kinds are narrowed to
    /// `run_date`. Records whose tenant key differs from `tenant` are dropped,
    /// and the store's count for that kind is then no longer trusted: it is
    /// replaced by an inexact count of the records kept.
    pub async fn run_scoped(
        &self,
        tenant: &TenantKey,
        kinds: &[EntityKind],
        run_date: NaiveDate,
        deadline: Instant,
    ) -> ReadResults {
        let kinds: BTreeSet<EntityKind> = kinds.iter().copied().collect();
        let reads = kinds
            .into_iter()
            .map(|kind| {
                let predicate = Predicate::scoped(tenant);
                let predicate = if kind.filters_by_run_date() {
                    predicate.on_date(run_date)
                } else {
                    predicate
                };
                (kind, predicate)
            })
            .collect();

        let mut results = fan_out(
            &self.service,
            reads,
            SAMPLE_LIMIT,
            self.max_concurrency,
            deadline,
        )
        .await;

        for (kind, result) in &mut results {
            if let Ok(page) = result {
                let before = page.items.len();
                page.items
                    .retain(|record| record.tenant_key() == Some(tenant.as_str()));
                let dropped = before - page.items.len();
                if dropped > 0 {
                    page.count = RecordCount::at_least(page.items.len() as u64);
                    tracing::warn!(
                        %kind,
                        dropped,
                        tenant_key = %tenant,
                        "store returned records outside the tenant scope; dropped",
                    );
                }
            }
        }
        results
    }
}
