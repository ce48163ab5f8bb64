//! # tess-report
//!
//! Tenant-scoped aggregation and cross-tenant integrity auditing.
//!
//! - [`ScopedQueryEngine`]: bounded-concurrency scoped reads, one per kind
//! - [`IntegrityScanner`]: operator-only scan for records without a tenant key
//! - [`assemble`]: pure merge of both into an [`AggregationReport`]
//! - [`ReportRunner`]: session → tenant → reads, with the scan alongside,
//!   under a run-level deadline
//!
//! [`AggregationReport`]: tess_core::report::AggregationReport

pub mod assemble;
pub mod engine;
mod fanout;
pub mod integrity;
pub mod runner;

pub use assemble::assemble;
pub use engine::ScopedQueryEngine;
pub use fanout::ReadResults;
pub use integrity::{IntegrityScanner, SCAN_LIMIT};
pub use runner::{ReportRunner, RunError};
