use std::sync::Arc;

use tess_report::{IntegrityScanner, ReportRunner};

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output_findings;
use crate::progress::Progress;

/// Handle `tess audit`: the cross-tenant orphan scan on its own.
pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let settings = &ctx.config.report;
    let (store, grant) = ctx.operator_store()?;

    let scanner = IntegrityScanner::new(
        Arc::clone(&store),
        &grant,
        &settings.integrity_kinds,
        settings.max_concurrency,
    );
    tracing::info!(kinds = ?scanner.kinds(), "starting orphan scan");
    let runner = ReportRunner::new(store, settings).with_integrity(scanner);

    let progress = Progress::spinner("scanning for unscoped records");
    let findings = runner.run_integrity_only().await;
    progress.finish_clear();

    output_findings(&findings?, flags.format)
}
