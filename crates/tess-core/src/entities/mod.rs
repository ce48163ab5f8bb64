//! Entity structs for the tenant-owned collections.
//!
//! Each struct maps to one collection in the backing store (see
//! [`EntityKind::collection`]). Every record carries an `id` and a nullable
//! `tenant_key`; the remaining fields are kind-specific. Unknown columns are
//! ignored on decode.

mod attendance;
mod department;
mod leave_request;
mod membership;
mod profile;
mod project;
mod task;

pub use attendance::AttendanceRecord;
pub use department::Department;
pub use leave_request::LeaveRequest;
pub use membership::ProjectMembership;
pub use profile::Profile;
pub use project::Project;
pub use task::Task;

use schemars::JsonSchema;
use serde::Serialize;

use crate::enums::EntityKind;

/// A decoded record of any kind.
///
/// Serializes as the inner struct. Decoding needs the kind up front, see
/// [`Record::decode`].
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq, Eq)]
#[serde(untagged)]
pub enum Record {
    Profile(Profile),
    Project(Project),
    Task(Task),
    Department(Department),
    LeaveRequest(LeaveRequest),
    AttendanceRecord(AttendanceRecord),
    ProjectMembership(ProjectMembership),
}

impl Record {
    /// Decode a raw JSON row of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if the row is missing required fields or a
    /// field has the wrong shape.
    pub fn decode(kind: EntityKind, row: serde_json::Value) -> Result<Self, serde_json::Error> {
        Ok(match kind {
            EntityKind::Profile => Self::Profile(serde_json::from_value(row)?),
            EntityKind::Project => Self::Project(serde_json::from_value(row)?),
            EntityKind::Task => Self::Task(serde_json::from_value(row)?),
            EntityKind::Department => Self::Department(serde_json::from_value(row)?),
            EntityKind::LeaveRequest => Self::LeaveRequest(serde_json::from_value(row)?),
            EntityKind::AttendanceRecord => Self::AttendanceRecord(serde_json::from_value(row)?),
            EntityKind::ProjectMembership => {
                Self::ProjectMembership(serde_json::from_value(row)?)
            }
        })
    }

    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Profile(_) => EntityKind::Profile,
            Self::Project(_) => EntityKind::Project,
            Self::Task(_) => EntityKind::Task,
            Self::Department(_) => EntityKind::Department,
            Self::LeaveRequest(_) => EntityKind::LeaveRequest,
            Self::AttendanceRecord(_) => EntityKind::AttendanceRecord,
            Self::ProjectMembership(_) => EntityKind::ProjectMembership,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Profile(r) => &r.id,
            Self::Project(r) => &r.id,
            Self::Task(r) => &r.id,
            Self::Department(r) => &r.id,
            Self::LeaveRequest(r) => &r.id,
            Self::AttendanceRecord(r) => &r.id,
            Self::ProjectMembership(r) => &r.id,
        }
    }

    /// The record's tenant key. Empty strings count as missing.
    #[must_use]
    pub fn tenant_key(&self) -> Option<&str> {
        let raw = match self {
            Self::Profile(r) => r.tenant_key.as_deref(),
            Self::Project(r) => r.tenant_key.as_deref(),
            Self::Task(r) => r.tenant_key.as_deref(),
            Self::Department(r) => r.tenant_key.as_deref(),
            Self::LeaveRequest(r) => r.tenant_key.as_deref(),
            Self::AttendanceRecord(r) => r.tenant_key.as_deref(),
            Self::ProjectMembership(r) => r.tenant_key.as_deref(),
        };
        raw.filter(|key| !key.is_empty())
    }

    /// Minimal human-readable field for listings. Falls back to the id.
    #[must_use]
    pub fn display_label(&self) -> &str {
        let label = match self {
            Self::Profile(r) => r.full_name.as_deref().or(r.email.as_deref()),
            Self::Project(r) => Some(r.name.as_str()),
            Self::Task(r) => Some(r.title.as_str()),
            Self::Department(r) => Some(r.name.as_str()),
            Self::LeaveRequest(r) => Some(r.employee_id.as_str()),
            Self::AttendanceRecord(r) => Some(r.employee_id.as_str()),
            Self::ProjectMembership(r) => Some(r.member_id.as_str()),
        };
        label.filter(|l| !l.is_empty()).unwrap_or_else(|| self.id())
    }
}
