//! Shared fixtures for tess-report integration tests.
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use serde_json::{Value, json};
use tess_core::entities::Profile;
use tess_core::enums::EntityKind;
use tess_core::identity::{Principal, TenantKey};
use tess_core::predicate::Predicate;
use tess_core::service::{DataService, QueryPage, RecordCount};
use tess_store::{MemoryStore, StoreError};

pub const TENANT: &str = "org-1";
pub const OTHER_TENANT: &str = "org-2";

pub fn principal() -> Principal {
    Principal {
        id: "usr-1".into(),
        email: Some("ada@example.com".into()),
    }
}

/// A store with data for two tenants, orphans, and today's attendance.
pub fn two_tenant_store(today: &str) -> MemoryStore {
    MemoryStore::new(Some(principal()))
        .with_rows(
            EntityKind::Profile,
            [
                json!({ "id": "usr-1", "full_name": "Ada", "tenant_key": TENANT }),
                json!({ "id": "usr-2", "full_name": "Bob", "tenant_key": TENANT }),
                json!({ "id": "usr-3", "full_name": "Eve", "tenant_key": OTHER_TENANT }),
                json!({ "id": "usr-9", "email": "ghost@example.com", "tenant_key": null }),
                json!({ "id": "usr-7", "full_name": "Nobody" }),
            ],
        )
        .with_rows(
            EntityKind::Project,
            [
                json!({ "id": "prj-1", "name": "Apollo", "tenant_key": TENANT }),
                json!({ "id": "prj-2", "name": "Gemini", "tenant_key": OTHER_TENANT }),
                json!({ "id": "prj-3", "name": "Legacy", "tenant_key": null }),
            ],
        )
        .with_rows(EntityKind::Task, tasks(TENANT, 8))
        .with_rows(EntityKind::Task, tasks(OTHER_TENANT, 3))
        .with_rows(
            EntityKind::Department,
            [json!({ "id": "dep-1", "name": "Ops", "tenant_key": OTHER_TENANT })],
        )
        .with_rows(
            EntityKind::AttendanceRecord,
            [
                json!({ "id": "att-1", "employee_id": "usr-1", "date": today, "tenant_key": TENANT }),
                json!({ "id": "att-0", "employee_id": "usr-1", "date": "2000-01-01", "tenant_key": TENANT }),
            ],
        )
}

pub fn tasks(tenant: &str, n: usize) -> Vec<Value> {
    (0..n)
        .map(|i| json!({ "id": format!("{tenant}-tsk-{i}"), "title": format!("Task {i}"), "tenant_key": tenant }))
        .collect()
}

/// Wraps a [`MemoryStore`] with injected failures, delays, panics and leaks,
/// and records every read it receives.
#[derive(Default)]
pub struct ScriptedStore {
    pub inner: MemoryStore,
    pub failing: HashMap<EntityKind, String>,
    pub delays: HashMap<EntityKind, Duration>,
    pub panicking: HashSet<EntityKind>,
    /// Kinds for which the store ignores the predicate entirely.
    pub leaking: HashSet<EntityKind>,
    pub session_delay: Option<Duration>,
    pub calls: Mutex<Vec<(EntityKind, Predicate)>>,
    in_flight: AtomicUsize,
    pub max_in_flight: AtomicUsize,
}

impl ScriptedStore {
    pub fn new(inner: MemoryStore) -> Self {
        Self {
            inner,
            ..Default::default()
        }
    }

    pub fn fail(mut self, kind: EntityKind, message: &str) -> Self {
        self.failing.insert(kind, message.to_string());
        self
    }

    pub fn delay(mut self, kind: EntityKind, delay: Duration) -> Self {
        self.delays.insert(kind, delay);
        self
    }

    pub fn panic_on(mut self, kind: EntityKind) -> Self {
        self.panicking.insert(kind);
        self
    }

    pub fn leak(mut self, kind: EntityKind) -> Self {
        self.leaking.insert(kind);
        self
    }

    pub fn calls(&self) -> Vec<(EntityKind, Predicate)> {
        self.calls.lock().unwrap().clone()
    }
}

impl DataService for ScriptedStore {
    type Error = StoreError;

    async fn query(
        &self,
        kind: EntityKind,
        predicate: &Predicate,
        limit: usize,
    ) -> Result<QueryPage, StoreError> {
        self.calls.lock().unwrap().push((kind, predicate.clone()));
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(&kind) {
            tokio::time::sleep(*delay).await;
        }
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        assert!(!self.panicking.contains(&kind), "injected panic for {kind}");
        if let Some(message) = self.failing.get(&kind) {
            return Err(StoreError::Api {
                status: 500,
                message: message.clone(),
            });
        }
        if self.leaking.contains(&kind) {
            let foreign = Predicate::scoped(&TenantKey::new(OTHER_TENANT).unwrap());
            let mut items = self.inner.query(kind, predicate, limit).await?.items;
            items.extend(self.inner.query(kind, &foreign, limit).await?.items);
            if !predicate.is_orphan_scan() {
                items.extend(self.inner.query(kind, &Predicate::orphaned(), limit).await?.items);
            }
            return Ok(QueryPage {
                count: RecordCount::exact(items.len() as u64),
                items,
            });
        }
        self.inner.query(kind, predicate, limit).await
    }

    async fn current_principal(&self) -> Result<Option<Principal>, StoreError> {
        if let Some(delay) = self.session_delay {
            tokio::time::sleep(delay).await;
        }
        self.inner.current_principal().await
    }

    async fn profile_by_id(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        self.inner.profile_by_id(id).await
    }
}
