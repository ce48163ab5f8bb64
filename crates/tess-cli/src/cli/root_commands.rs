use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use tess_core::enums::EntityKind;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Aggregate the signed-in tenant's records across entity kinds.
    Report(ReportArgs),
    /// Scan every tenant for records with no tenant key (operator only).
    Audit(AuditArgs),
    /// Show the signed-in principal and the tenant it resolves to.
    Whoami(WhoamiArgs),
    /// Print the JSON Schema of the report.
    Schema,
}

impl Commands {
    /// Fixture file selected for this command, if any.
    #[must_use]
    pub fn fixture(&self) -> Option<&Path> {
        match self {
            Self::Report(args) => args.fixture.as_deref(),
            Self::Audit(args) => args.fixture.as_deref(),
            Self::Whoami(args) => args.fixture.as_deref(),
            Self::Schema => None,
        }
    }
}

#[derive(Clone, Debug, Args)]
pub struct ReportArgs {
    /// Comma-separated kinds to read (defaults to every kind)
    #[arg(long, value_delimiter = ',', value_parser = parse_kind)]
    pub kinds: Vec<EntityKind>,

    /// Also run the cross-tenant orphan scan (requires operator access)
    #[arg(long)]
    pub integrity: bool,

    /// Read from a JSON fixture instead of the configured store
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct AuditArgs {
    /// Read from a JSON fixture instead of the configured store
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct WhoamiArgs {
    /// Read from a JSON fixture instead of the configured store
    #[arg(long, value_name = "FILE")]
    pub fixture: Option<PathBuf>,
}

fn parse_kind(raw: &str) -> Result<EntityKind, String> {
    raw.parse::<EntityKind>().map_err(|error| error.to_string())
}
