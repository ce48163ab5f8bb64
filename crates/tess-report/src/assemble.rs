//! Report assembly. Pure: no I/O, no clock.

use chrono::{DateTime, NaiveDate, Utc};
use tess_core::identity::{Principal, TenantKey};
use tess_core::report::{AggregationReport, IntegrityFindings, KindReport, SAMPLE_LIMIT};
use tess_core::service::QueryPage;

use crate::fanout::ReadResults;

/// Merge scoped read results and optional integrity findings into a report.
#[must_use]
pub fn assemble(
    tenant_key: TenantKey,
    principal: Principal,
    run_date: NaiveDate,
    generated_at: DateTime<Utc>,
    scoped: ReadResults,
    integrity: Option<IntegrityFindings>,
) -> AggregationReport {
    let per_kind = scoped
        .into_iter()
        .map(|(kind, result)| {
            let report = match result {
                Ok(page) => kind_report(page),
                Err(error) => KindReport::Failed { error },
            };
            (kind, report)
        })
        .collect();

    AggregationReport {
        tenant_key,
        principal,
        run_date,
        generated_at,
        per_kind,
        integrity,
    }
}

/// Truncate a page to the sample limit and derive the remainder.
///
/// With an exact count, `remainder = total - sample.len()`. With an inexact
/// count the remainder is unknown and reported as zero.
#[must_use]
pub fn kind_report(page: QueryPage) -> KindReport {
    let QueryPage { count, mut items } = page;
    items.truncate(SAMPLE_LIMIT);
    let remainder = if count.exact {
        count.total.saturating_sub(items.len() as u64)
    } else {
        0
    };
    KindReport::Ok {
        count,
        sample: items,
        remainder,
    }
}
