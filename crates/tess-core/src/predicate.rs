//! Read predicates: conjunctions of equality and IS NULL filters.
//!
//! Predicates are only built through the named constructors below, so a
//! tenant-scoped read and an orphan scan can never be confused: `scoped`
//! always starts with `tenant_key = <key>`, `orphaned` always starts with
//! `tenant_key IS NULL`, and neither can be turned into the other.

use chrono::NaiveDate;

use crate::identity::TenantKey;

/// Column holding the tenant key in every tenant-owned collection.
pub const TENANT_COLUMN: &str = "tenant_key";

/// Primary key column of every collection.
pub const ID_COLUMN: &str = "id";

/// Column holding the calendar date of an attendance record.
pub const DATE_COLUMN: &str = "date";

/// A single column filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq { column: &'static str, value: String },
    IsNull { column: &'static str },
}

impl Filter {
    #[must_use]
    pub const fn column(&self) -> &'static str {
        match self {
            Self::Eq { column, .. } | Self::IsNull { column } => column,
        }
    }
}

/// Conjunction of filters applied to one collection read, with an optional
/// ascending sort column. Without one, rows come back in the store's natural
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    filters: Vec<Filter>,
    order_by: Option<&'static str>,
}

impl Predicate {
    /// Records owned by `tenant`.
    #[must_use]
    pub fn scoped(tenant: &TenantKey) -> Self {
        Self {
            filters: vec![Filter::Eq {
                column: TENANT_COLUMN,
                value: tenant.as_str().to_string(),
            }],
            order_by: None,
        }
    }

    /// Records owned by no tenant at all.
    #[must_use]
    pub fn orphaned() -> Self {
        Self {
            filters: vec![Filter::IsNull {
                column: TENANT_COLUMN,
            }],
            order_by: None,
        }
    }

    /// A single record by primary key, regardless of tenant.
    #[must_use]
    pub fn by_id(id: &str) -> Self {
        Self {
            filters: vec![Filter::Eq {
                column: ID_COLUMN,
                value: id.to_string(),
            }],
            order_by: None,
        }
    }

    /// Narrow to records dated `date`.
    #[must_use]
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.filters.push(Filter::Eq {
            column: DATE_COLUMN,
            value: date.format("%Y-%m-%d").to_string(),
        });
        self
    }

    /// Return rows in ascending id order, so a capped read keeps the lowest ids.
    #[must_use]
    pub fn ordered_by_id(mut self) -> Self {
        self.order_by = Some(ID_COLUMN);
        self
    }

    #[must_use]
    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    #[must_use]
    pub const fn order_by(&self) -> Option<&'static str> {
        self.order_by
    }

    /// The tenant key this predicate is scoped to, if any.
    #[must_use]
    pub fn tenant_scope(&self) -> Option<&str> {
        self.filters.iter().find_map(|filter| match filter {
            Filter::Eq { column, value } if *column == TENANT_COLUMN => Some(value.as_str()),
            _ => None,
        })
    }

    /// Whether this predicate selects records without a tenant key.
    #[must_use]
    pub fn is_orphan_scan(&self) -> bool {
        self.filters
            .iter()
            .any(|filter| matches!(filter, Filter::IsNull { column } if *column == TENANT_COLUMN))
    }
}
