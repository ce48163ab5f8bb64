use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One employee's attendance for one calendar day.
///
/// `check_in`/`check_out` are kept as the store's raw timestamp strings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct AttendanceRecord {
    pub id: String,
    pub employee_id: String,
    pub date: NaiveDate,
    pub status: Option<String>,
    pub check_in: Option<String>,
    pub check_out: Option<String>,
    pub tenant_key: Option<String>,
}
