//! Bounded-concurrency fan-out shared by the scoped engine and the scanner.
//!
//! One task per kind in a `JoinSet`, gated by a semaphore. Each task returns
//! its own `(kind, result)` slot; slots are merged into a `BTreeMap` so the
//! output order never depends on completion order.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tess_core::enums::EntityKind;
use tess_core::predicate::Predicate;
use tess_core::report::KindError;
use tess_core::service::{DataService, QueryPage};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::Instant;

/// Per-kind outcome of a fan-out, keyed (and therefore ordered) by kind.
pub type ReadResults = BTreeMap<EntityKind, Result<QueryPage, KindError>>;

/// Run one read per `(kind, predicate)` pair, at most `max_concurrency` at a time.
///
/// Every kind in `reads` gets exactly one entry. Store errors and panics
/// become `QueryFailure` for that kind only; reads still pending at
/// `deadline` are aborted and become `Timeout`.
pub(crate) async fn fan_out<S: DataService>(
    service: &Arc<S>,
    reads: Vec<(EntityKind, Predicate)>,
    limit: usize,
    max_concurrency: usize,
    deadline: Instant,
) -> ReadResults {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut set = JoinSet::new();
    let mut task_kinds = HashMap::with_capacity(reads.len());
    let requested: Vec<EntityKind> = reads.iter().map(|(kind, _)| *kind).collect();

    for (kind, predicate) in reads {
        let service = Arc::clone(service);
        let sem = Arc::clone(&semaphore);
        let handle = set.spawn(async move {
            let Ok(_permit) = sem.acquire().await else {
                return (kind, Err("read slot unavailable".to_string()));
            };
            let result = service
                .query(kind, &predicate, limit)
                .await
                .map_err(|error| error.to_string());
            (kind, result)
        });
        task_kinds.insert(handle.id(), kind);
    }

    let mut results = ReadResults::new();
    loop {
        match tokio::time::timeout_at(deadline, set.join_next()).await {
            Ok(Some(Ok((kind, Ok(page))))) => {
                results.insert(kind, Ok(page));
            }
            Ok(Some(Ok((kind, Err(cause))))) => {
                tracing::warn!(%kind, %cause, "read failed");
                results.insert(kind, Err(KindError::QueryFailure { cause }));
            }
            Ok(Some(Err(join_error))) => {
                let Some(kind) = task_kinds.get(&join_error.id()).copied() else {
                    tracing::warn!(%join_error, "read task failed for an unknown kind");
                    continue;
                };
                tracing::warn!(%kind, %join_error, "read task failed");
                results.insert(
                    kind,
                    Err(KindError::QueryFailure {
                        cause: format!("read task failed: {join_error}"),
                    }),
                );
            }
            Ok(None) => break,
            Err(_elapsed) => {
                set.abort_all();
                break;
            }
        }
    }

    for kind in requested {
        results.entry(kind).or_insert_with(|| {
            tracing::warn!(%kind, "read did not finish before the run deadline");
            Err(KindError::Timeout)
        });
    }
    results
}
