//! Report values produced by a run.
//!
//! An [`AggregationReport`] is a plain value owned by whoever invoked the run.
//! Per-kind failures are data, not errors: a degraded report still carries an
//! entry for every requested kind, and "zero records", "query failed" and
//! "timed out" are distinct variants.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::Serialize;

use crate::entities::Record;
use crate::enums::EntityKind;
use crate::identity::{Principal, TenantKey};
use crate::service::RecordCount;

/// Maximum number of sample records kept per kind.
pub const SAMPLE_LIMIT: usize = 5;

/// Why a single kind has no result.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KindError {
    /// The read itself failed.
    QueryFailure { cause: String },
    /// The read had not finished when the run deadline passed.
    Timeout,
}

impl fmt::Display for KindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::QueryFailure { cause } => write!(f, "query failed: {cause}"),
            Self::Timeout => f.write_str("timed out"),
        }
    }
}

/// Outcome of one tenant-scoped kind.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum KindReport {
    Ok {
        count: RecordCount,
        sample: Vec<Record>,
        /// Matching records not included in `sample`. Zero when the count is inexact.
        remainder: u64,
    },
    Failed {
        error: KindError,
    },
}

impl KindReport {
    #[must_use]
    pub const fn error(&self) -> Option<&KindError> {
        match self {
            Self::Ok { .. } => None,
            Self::Failed { error } => Some(error),
        }
    }

    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// A record of a checked kind whose tenant key is null.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
pub struct IntegrityViolation {
    pub kind: EntityKind,
    pub id: String,
    pub label: String,
}

/// Outcome of the orphan scan for one checked kind.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum IntegrityReport {
    Scanned {
        /// Orphans of this kind in the store, listed or not.
        total: RecordCount,
        /// The lowest-id orphans, at most the scan limit.
        violations: Vec<IntegrityViolation>,
        /// Orphans not included in `violations`. Zero when the total is inexact.
        remainder: u64,
    },
    Failed {
        error: KindError,
    },
}

impl IntegrityReport {
    /// A completed scan that listed `violations` out of `total` orphans.
    #[must_use]
    pub fn scanned(total: RecordCount, violations: Vec<IntegrityViolation>) -> Self {
        let remainder = if total.exact {
            total.total.saturating_sub(violations.len() as u64)
        } else {
            0
        };
        Self::Scanned {
            total,
            violations,
            remainder,
        }
    }

    /// Orphans found, listed plus unlisted. Zero when the scan failed.
    #[must_use]
    pub fn found(&self) -> u64 {
        match self {
            Self::Scanned {
                violations,
                remainder,
                ..
            } => violations.len() as u64 + remainder,
            Self::Failed { .. } => 0,
        }
    }

    /// Violations found, empty when the scan failed.
    #[must_use]
    pub fn violations(&self) -> &[IntegrityViolation] {
        match self {
            Self::Scanned { violations, .. } => violations,
            Self::Failed { .. } => &[],
        }
    }
}

/// Orphan scan results keyed by checked kind.
pub type IntegrityFindings = BTreeMap<EntityKind, IntegrityReport>;

/// The merged result of one report run.
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
pub struct AggregationReport {
    pub tenant_key: TenantKey,
    pub principal: Principal,
    /// Calendar date (UTC) used for date-filtered kinds in this run.
    pub run_date: NaiveDate,
    pub generated_at: DateTime<Utc>,
    /// One entry per requested kind, in enumeration order.
    pub per_kind: BTreeMap<EntityKind, KindReport>,
    /// `None` when the privileged orphan scan was not part of the run.
    pub integrity: Option<IntegrityFindings>,
}

impl AggregationReport {
    /// Kinds whose scoped read failed or timed out.
    #[must_use]
    pub fn degraded_kinds(&self) -> Vec<EntityKind> {
        self.per_kind
            .iter()
            .filter(|(_, report)| report.is_failed())
            .map(|(kind, _)| *kind)
            .collect()
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.per_kind.values().any(KindReport::is_failed)
            || self.integrity.as_ref().is_some_and(|findings| {
                findings
                    .values()
                    .any(|report| matches!(report, IntegrityReport::Failed { .. }))
            })
    }

    /// Total number of unscoped records found across all checked kinds,
    /// including those past the listing limit.
    #[must_use]
    pub fn violation_count(&self) -> u64 {
        self.integrity.as_ref().map_or(0, |findings| {
            findings.values().map(IntegrityReport::found).sum()
        })
    }
}
