//! Row and filter helpers shared by the REST and in-memory stores.
//!
//! Both stores speak the same filter dialect: `column=eq.value` and
//! `column=is.null`. The REST store renders predicates into query parameters;
//! the memory store evaluates them directly against JSON rows.

use serde_json::Value;
use tess_core::entities::Record;
use tess_core::enums::EntityKind;
use tess_core::predicate::{Filter, Predicate};

use crate::error::StoreError;

/// Decode raw JSON rows of `kind` into records.
///
/// # Errors
///
/// Returns `StoreError::Decode` naming the first row that fails to decode.
pub fn decode_rows(kind: EntityKind, rows: Vec<Value>) -> Result<Vec<Record>, StoreError> {
    rows.into_iter()
        .enumerate()
        .map(|(idx, row)| {
            Record::decode(kind, row)
                .map_err(|e| StoreError::Decode(format!("{kind} row {idx}: {e}")))
        })
        .collect()
}

/// Render a predicate as `column=op.value` query parameters (values URL-encoded).
#[must_use]
pub fn filter_params(predicate: &Predicate) -> Vec<String> {
    predicate
        .filters()
        .iter()
        .map(|filter| match filter {
            Filter::Eq { column, value } => {
                format!("{column}=eq.{}", urlencoding::encode(value))
            }
            Filter::IsNull { column } => format!("{column}=is.null"),
        })
        .collect()
}

/// Whether a JSON row satisfies every filter of `predicate`.
///
/// `IS NULL` matches an explicit null or a missing column. Equality compares
/// strings directly and other scalars by their JSON text.
#[must_use]
pub fn row_matches(row: &Value, predicate: &Predicate) -> bool {
    predicate.filters().iter().all(|filter| match filter {
        Filter::IsNull { column } => row.get(*column).is_none_or(Value::is_null),
        Filter::Eq { column, value } => match row.get(*column) {
            Some(Value::String(s)) => s == value,
            Some(Value::Null) | None => false,
            Some(other) => other.to_string() == *value,
        },
    })
}
