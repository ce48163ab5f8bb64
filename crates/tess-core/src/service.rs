//! The remote data service contract.
//!
//! Tessera never talks to a concrete backend directly. Resolvers, the scoped
//! query engine and the integrity scanner are generic over [`DataService`];
//! `tess-store` provides the HTTP and in-memory implementations.

use std::future::Future;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{Profile, Record};
use crate::enums::EntityKind;
use crate::identity::Principal;
use crate::predicate::Predicate;

/// Total number of records matching a read.
///
/// When the store cannot report a count, `total` is the number of items
/// actually returned and `exact` is `false` ("at least this many").
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RecordCount {
    pub total: u64,
    pub exact: bool,
}

impl RecordCount {
    #[must_use]
    pub const fn exact(total: u64) -> Self {
        Self { total, exact: true }
    }

    #[must_use]
    pub const fn at_least(total: u64) -> Self {
        Self {
            total,
            exact: false,
        }
    }
}

/// One page of a collection read: the first items in the store's natural
/// order plus the total match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryPage {
    pub count: RecordCount,
    pub items: Vec<Record>,
}

/// A queryable store reachable over the network (or in memory).
///
/// Implementations are shared read-only across concurrent tasks of one run,
/// hence the `Send + Sync + 'static` bound and `Send` futures.
pub trait DataService: Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Read up to `limit` records of `kind` matching `predicate`, with a count.
    fn query(
        &self,
        kind: EntityKind,
        predicate: &Predicate,
        limit: usize,
    ) -> impl Future<Output = Result<QueryPage, Self::Error>> + Send;

    /// The principal of the active session, or `None` when nobody is signed in.
    fn current_principal(
        &self,
    ) -> impl Future<Output = Result<Option<Principal>, Self::Error>> + Send;

    /// The profile whose id equals `id`, regardless of its tenant.
    fn profile_by_id(
        &self,
        id: &str,
    ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send;
}
