//! Runtime choice between the HTTP and fixture stores.
//!
//! [`DataService`] is not object safe (its methods return `impl Future`), so
//! callers that pick a store at runtime hold this enum instead of a trait object.

use tess_core::entities::Profile;
use tess_core::enums::EntityKind;
use tess_core::identity::Principal;
use tess_core::predicate::Predicate;
use tess_core::service::{DataService, QueryPage};

use crate::error::StoreError;
use crate::memory::MemoryStore;
use crate::rest::RestStore;

#[derive(Debug, Clone)]
pub enum StoreBackend {
    Rest(RestStore),
    Memory(MemoryStore),
}

impl StoreBackend {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rest(_) => "rest",
            Self::Memory(_) => "fixture",
        }
    }
}

impl DataService for StoreBackend {
    type Error = StoreError;

    async fn query(
        &self,
        kind: EntityKind,
        predicate: &Predicate,
        limit: usize,
    ) -> Result<QueryPage, StoreError> {
        match self {
            Self::Rest(store) => store.query(kind, predicate, limit).await,
            Self::Memory(store) => store.query(kind, predicate, limit).await,
        }
    }

    async fn current_principal(&self) -> Result<Option<Principal>, StoreError> {
        match self {
            Self::Rest(store) => store.current_principal().await,
            Self::Memory(store) => store.current_principal().await,
        }
    }

    async fn profile_by_id(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        match self {
            Self::Rest(store) => store.profile_by_id(id).await,
            Self::Memory(store) => store.profile_by_id(id).await,
        }
    }
}
