//! Read-only in-memory data service backed by a JSON fixture.
//!
//! Fixture shape:
//!
//! ```json
//! {
//!   "principal": { "id": "usr-1", "email": "ada@example.com" },
//!   "collections": {
//!     "profiles": [ { "id": "usr-1", "tenant_key": "org-1" } ],
//!     "projects": [ { "id": "prj-1", "name": "Apollo", "tenant_key": "org-1" } ]
//!   }
//! }
//! ```
//!
//! Collections may be keyed by collection name (`projects`) or kind name
//! (`project`). Rows keep fixture order, which is the store's natural order.
//! Counts are always exact.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tess_core::entities::Profile;
use tess_core::enums::EntityKind;
use tess_core::identity::Principal;
use tess_core::predicate::Predicate;
use tess_core::service::{DataService, QueryPage, RecordCount};

use crate::error::StoreError;
use crate::helpers::{decode_rows, row_matches};

#[derive(Deserialize)]
struct Fixture {
    #[serde(default)]
    principal: Option<Principal>,
    #[serde(default)]
    collections: BTreeMap<String, Vec<Value>>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    principal: Option<Principal>,
    rows: HashMap<EntityKind, Vec<Value>>,
}

impl MemoryStore {
    /// An empty store whose session belongs to `principal`.
    #[must_use]
    pub fn new(principal: Option<Principal>) -> Self {
        Self {
            principal,
            rows: HashMap::new(),
        }
    }

    /// Append raw rows to `kind`'s collection.
    #[must_use]
    pub fn with_rows(mut self, kind: EntityKind, rows: impl IntoIterator<Item = Value>) -> Self {
        self.rows.entry(kind).or_default().extend(rows);
        self
    }

    /// Parse a fixture document.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Fixture` if the JSON is malformed or names an
    /// unknown collection.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let fixture: Fixture = serde_json::from_str(json)
            .map_err(|e| StoreError::Fixture(format!("invalid fixture JSON: {e}")))?;

        let mut store = Self::new(fixture.principal);
        for (name, rows) in fixture.collections {
            let kind: EntityKind = name
                .parse()
                .map_err(|e| StoreError::Fixture(format!("{e}")))?;
            store = store.with_rows(kind, rows);
        }
        Ok(store)
    }

    /// Load a fixture file.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Fixture` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| StoreError::Fixture(format!("read {}: {e}", path.display())))?;
        let store = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            collections = store.rows.len(),
            "fixture loaded"
        );
        Ok(store)
    }

    fn rows(&self, kind: EntityKind) -> &[Value] {
        self.rows.get(&kind).map_or(&[][..], Vec::as_slice)
    }
}

impl DataService for MemoryStore {
    type Error = StoreError;

    async fn query(
        &self,
        kind: EntityKind,
        predicate: &Predicate,
        limit: usize,
    ) -> Result<QueryPage, StoreError> {
        let mut matched: Vec<&Value> = self
            .rows(kind)
            .iter()
            .filter(|row| row_matches(row, predicate))
            .collect();
        if let Some(column) = predicate.order_by() {
            matched.sort_by(|a, b| sort_key(a, column).cmp(&sort_key(b, column)));
        }
        let count = RecordCount::exact(matched.len() as u64);
        let items = decode_rows(kind, matched.into_iter().take(limit).cloned().collect())?;
        Ok(QueryPage { count, items })
    }

    async fn current_principal(&self) -> Result<Option<Principal>, StoreError> {
        Ok(self.principal.clone())
    }

    async fn profile_by_id(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        let predicate = Predicate::by_id(id);
        self.rows(EntityKind::Profile)
            .iter()
            .find(|row| row_matches(row, &predicate))
            .map(|row| {
                serde_json::from_value(row.clone())
                    .map_err(|e| StoreError::Decode(format!("profile {id}: {e}")))
            })
            .transpose()
    }
}

fn sort_key<'a>(row: &'a Value, column: &str) -> Option<&'a str> {
    row.get(column).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tess_core::identity::TenantKey;

    const FIXTURE: &str = r#"{
        "principal": { "id": "usr-1", "email": "ada@example.com" },
        "collections": {
            "profiles": [
                { "id": "usr-1", "full_name": "Ada", "tenant_key": "org-1" },
                { "id": "usr-2", "full_name": "Ghost", "tenant_key": null }
            ],
            "project": [
                { "id": "prj-1", "name": "Apollo", "tenant_key": "org-1" },
                { "id": "prj-2", "name": "Gemini", "tenant_key": "org-2" }
            ]
        }
    }"#;

    #[tokio::test]
    async fn fixture_accepts_collection_and_kind_names() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        let key = TenantKey::new("org-1").unwrap();

        let profiles = store
            .query(EntityKind::Profile, &Predicate::scoped(&key), 5)
            .await
            .unwrap();
        let projects = store
            .query(EntityKind::Project, &Predicate::scoped(&key), 5)
            .await
            .unwrap();

        assert_eq!(profiles.count, RecordCount::exact(1));
        assert_eq!(projects.items.len(), 1);
        assert_eq!(projects.items[0].id(), "prj-1");
    }

    #[tokio::test]
    async fn count_is_total_while_items_are_limited() {
        let key = TenantKey::new("org-1").unwrap();
        let rows = (0..7).map(|i| json!({ "id": format!("tsk-{i}"), "title": "t", "tenant_key": "org-1" }));
        let store = MemoryStore::new(None).with_rows(EntityKind::Task, rows);

        let page = store
            .query(EntityKind::Task, &Predicate::scoped(&key), 5)
            .await
            .unwrap();
        assert_eq!(page.count, RecordCount::exact(7));
        let ids: Vec<&str> = page.items.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["tsk-0", "tsk-1", "tsk-2", "tsk-3", "tsk-4"]);
    }

    #[tokio::test]
    async fn orphan_scan_finds_null_keys() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        let page = store
            .query(EntityKind::Profile, &Predicate::orphaned(), 5)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id(), "usr-2");
    }

    #[tokio::test]
    async fn ordered_read_caps_after_sorting_by_id() {
        let rows = ["prj-c", "prj-a", "prj-d", "prj-b"]
            .map(|id| json!({ "id": id, "name": id, "tenant_key": null }));
        let store = MemoryStore::new(None).with_rows(EntityKind::Project, rows);

        let page = store
            .query(EntityKind::Project, &Predicate::orphaned().ordered_by_id(), 2)
            .await
            .unwrap();
        assert_eq!(page.count, RecordCount::exact(4));
        let ids: Vec<&str> = page.items.iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["prj-a", "prj-b"]);
    }

    #[tokio::test]
    async fn profile_lookup_ignores_tenant() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        let ghost = store.profile_by_id("usr-2").await.unwrap().unwrap();
        assert_eq!(ghost.tenant_key, None);
        assert!(store.profile_by_id("usr-9").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn principal_comes_from_fixture() {
        let store = MemoryStore::from_json(FIXTURE).unwrap();
        let principal = store.current_principal().await.unwrap().unwrap();
        assert_eq!(principal.id, "usr-1");
        assert!(
            MemoryStore::from_json("{}")
                .unwrap()
                .current_principal()
                .await
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn unknown_collection_is_rejected() {
        let err = MemoryStore::from_json(r#"{ "collections": { "invoices": [] } }"#).unwrap_err();
        assert!(matches!(err, StoreError::Fixture(_)));
    }

    #[test]
    fn load_reads_file() {
        let tmp = tempfile::TempDir::new().expect("tmp dir");
        let path = tmp.path().join("fixture.json");
        std::fs::write(&path, FIXTURE).expect("write");
        assert!(MemoryStore::load(&path).is_ok());
        assert!(MemoryStore::load(&tmp.path().join("missing.json")).is_err());
    }
}
