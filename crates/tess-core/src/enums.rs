//! Entity kinds for the tenant-owned collections.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `EntityKind` derives `Ord` from declaration order, so any `BTreeMap` keyed by
//! kind iterates (and serializes) in the fixed enumeration order.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// A tenant-owned collection in the backing store.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Profile,
    Project,
    Task,
    Department,
    LeaveRequest,
    AttendanceRecord,
    ProjectMembership,
}

impl EntityKind {
    /// Every kind, in report order.
    pub const ALL: [Self; 7] = [
        Self::Profile,
        Self::Project,
        Self::Task,
        Self::Department,
        Self::LeaveRequest,
        Self::AttendanceRecord,
        Self::ProjectMembership,
    ];

    /// Kinds checked for missing tenant keys unless configured otherwise.
    pub const INTEGRITY_CHECKED: [Self; 2] = [Self::Profile, Self::Project];

    /// Return the string representation used in config, CLI args and reports.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Project => "project",
            Self::Task => "task",
            Self::Department => "department",
            Self::LeaveRequest => "leave_request",
            Self::AttendanceRecord => "attendance_record",
            Self::ProjectMembership => "project_membership",
        }
    }

    /// Collection (table) name in the backing store.
    #[must_use]
    pub const fn collection(self) -> &'static str {
        match self {
            Self::Profile => "profiles",
            Self::Project => "projects",
            Self::Task => "tasks",
            Self::Department => "departments",
            Self::LeaveRequest => "leave_requests",
            Self::AttendanceRecord => "attendance",
            Self::ProjectMembership => "project_members",
        }
    }

    /// Whether scoped reads of this kind are additionally filtered to the run date.
    #[must_use]
    pub const fn filters_by_run_date(self) -> bool {
        matches!(self, Self::AttendanceRecord)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    /// Accepts either the kind name (`leave_request`) or the collection name
    /// (`leave_requests`). Hyphens are treated as underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized || kind.collection() == normalized)
            .ok_or_else(|| CoreError::UnknownKind(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn all_is_sorted_in_declaration_order() {
        let mut sorted = EntityKind::ALL;
        sorted.sort();
        assert_eq!(sorted, EntityKind::ALL);
    }

    #[test]
    fn serde_matches_as_str() {
        for kind in EntityKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.as_str().to_string()));
        }
    }

    #[rstest]
    #[case("profile", EntityKind::Profile)]
    #[case("profiles", EntityKind::Profile)]
    #[case("leave-request", EntityKind::LeaveRequest)]
    #[case("attendance", EntityKind::AttendanceRecord)]
    #[case(" Project_Members ", EntityKind::ProjectMembership)]
    fn parses_names_and_collections(#[case] input: &str, #[case] expected: EntityKind) {
        assert_eq!(input.parse::<EntityKind>().unwrap(), expected);
    }

    #[test]
    fn rejects_unknown_kind() {
        let err = "invoice".parse::<EntityKind>().unwrap_err();
        assert!(matches!(err, CoreError::UnknownKind(ref s) if s == "invoice"));
    }

    #[test]
    fn only_attendance_filters_by_date() {
        let dated: Vec<_> = EntityKind::ALL
            .into_iter()
            .filter(|kind| kind.filters_by_run_date())
            .collect();
        assert_eq!(dated, vec![EntityKind::AttendanceRecord]);
    }

    #[test]
    fn collections_are_unique() {
        let mut names: Vec<_> = EntityKind::ALL.iter().map(|k| k.collection()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EntityKind::ALL.len());
    }
}
