//! Table rendering for reports and integrity findings.
//!
//! Layout of a report:
//!
//! ```text
//! tenant     org-1
//! principal  usr-1 (ada@example.com)
//! run date   2026-10-16
//!
//! kind        status   detail
//! ----------------------------------
//! profile     ok       2 records
//! task        failed   query failed: HTTP 500
//!
//! profile
//!   usr-1  Ada
//!   +1 more
//!
//! unscoped records found (1)
//!   project
//!     prj-3  Orphan
//! ```

use tess_core::report::{
    AggregationReport, IntegrityFindings, IntegrityReport, KindError, KindReport, SAMPLE_LIMIT,
};
use tess_core::service::RecordCount;
use tess_report::SCAN_LIMIT;

use super::table::{TableOptions, render_table};

/// Render a full report as plain text.
#[must_use]
pub fn render_report(report: &AggregationReport, options: TableOptions) -> String {
    let principal = match &report.principal.email {
        Some(email) => format!("{} ({email})", report.principal.id),
        None => report.principal.id.clone(),
    };

    let mut lines = vec![
        format!("tenant     {}", report.tenant_key),
        format!("principal  {principal}"),
        format!("run date   {}", report.run_date),
        format!("generated  {}", report.generated_at.to_rfc3339()),
        String::new(),
    ];

    let rows = report
        .per_kind
        .iter()
        .map(|(kind, kind_report)| {
            let (status, detail) = kind_summary(kind_report);
            vec![kind.to_string(), status.to_string(), detail]
        })
        .collect::<Vec<_>>();
    lines.push(render_table(&["kind", "status", "detail"], &rows, options));

    for (kind, kind_report) in &report.per_kind {
        let KindReport::Ok {
            count,
            sample,
            remainder,
        } = kind_report
        else {
            continue;
        };
        if sample.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(kind.to_string());
        lines.extend(
            sample
                .iter()
                .map(|record| format!("  {}  {}", record.id(), record.display_label())),
        );
        if let Some(suffix) = more_suffix(*count, sample.len(), *remainder, SAMPLE_LIMIT) {
            lines.push(format!("  {suffix}"));
        }
    }

    if let Some(findings) = &report.integrity {
        lines.push(String::new());
        lines.push(render_findings(findings));
    }

    lines.join("\n").trim_end().to_string()
}

/// Render orphan scan findings as a flat list grouped by kind.
///
/// The headline counts every orphan found, including those past the listing
/// limit; each truncated kind ends with a `+N more` line.
#[must_use]
pub fn render_findings(findings: &IntegrityFindings) -> String {
    let found: u64 = findings.values().map(IntegrityReport::found).sum();

    let mut lines = vec![if found == 0 {
        "unscoped records found: none".to_string()
    } else {
        format!("unscoped records found ({found})")
    }];

    for (kind, report) in findings {
        match report {
            IntegrityReport::Scanned { violations, .. } if violations.is_empty() => {}
            IntegrityReport::Scanned {
                total,
                violations,
                remainder,
            } => {
                lines.push(format!("  {kind}"));
                lines.extend(
                    violations
                        .iter()
                        .map(|violation| format!("    {}  {}", violation.id, violation.label)),
                );
                if let Some(suffix) = more_suffix(*total, violations.len(), *remainder, SCAN_LIMIT)
                {
                    lines.push(format!("    {suffix}"));
                }
            }
            IntegrityReport::Failed { error } => {
                lines.push(format!("  {kind}: scan {}", error_detail(error)));
            }
        }
    }

    lines.join("\n")
}

fn kind_summary(report: &KindReport) -> (&'static str, String) {
    match report {
        KindReport::Ok { count, .. } => ("ok", count_detail(*count)),
        KindReport::Failed {
            error: error @ KindError::QueryFailure { .. },
        } => ("failed", error_detail(error)),
        KindReport::Failed {
            error: error @ KindError::Timeout,
        } => ("timeout", error_detail(error)),
    }
}

fn count_detail(count: RecordCount) -> String {
    let noun = if count.total == 1 { "record" } else { "records" };
    if count.exact {
        format!("{} {noun}", count.total)
    } else {
        format!("at least {} {noun}", count.total)
    }
}

fn error_detail(error: &KindError) -> String {
    error.to_string()
}

/// `+N more` when the exact count exceeds what is shown, `+more` when the
/// count is inexact and the listing reached `limit`.
fn more_suffix(count: RecordCount, shown: usize, remainder: u64, limit: usize) -> Option<String> {
    if remainder > 0 {
        Some(format!("+{remainder} more"))
    } else if !count.exact && shown >= limit {
        Some("+more".to_string())
    } else {
        None
    }
}
