use tess_core::enums::EntityKind;
use tess_report::{IntegrityScanner, ReportRunner};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ReportArgs;
use crate::context::AppContext;
use crate::output::{output_findings, output_report};
use crate::progress::Progress;

/// Handle `tess report`.
///
/// Degraded reports still exit 0. A session or tenant failure exits nonzero,
/// after printing any orphan scan findings the run produced.
pub async fn handle(
    args: &ReportArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let settings = &ctx.config.report;
    let kinds = if args.kinds.is_empty() {
        EntityKind::ALL.to_vec()
    } else {
        args.kinds.clone()
    };

    let session = ctx.session_store()?;
    let operator = if args.integrity {
        Some(ctx.operator_store()?)
    } else {
        None
    };

    let runner = ReportRunner::new(session, settings).with_kinds(kinds);
    let progress = Progress::spinner(&format!("reading from {} store", ctx.backend_label()));
    let result = match operator {
        Some((store, grant)) => {
            let scanner = IntegrityScanner::new(
                store,
                &grant,
                &settings.integrity_kinds,
                settings.max_concurrency,
            );
            runner.with_integrity(scanner).run().await
        }
        None => runner.run().await,
    };

    match result {
        Ok(report) => {
            progress.finish_clear();
            if report.is_degraded() {
                tracing::warn!(degraded = ?report.degraded_kinds(), "report is incomplete");
            }
            output_report(&report, flags.format)
        }
        Err(error) => {
            progress.finish_err("report failed");
            if let Some(findings) = error.integrity() {
                output_findings(findings, flags.format)?;
            }
            Err(error.into())
        }
    }
}
