use dashmap::DashMap;
use futures::future::BoxFuture;
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::TimedOperation;
use crate::{log_debug, log_warn};

use super::entity::{Entity, RemoteCollection};
use super::optimistic::MutationState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Insert,
    Update,
    Delete,
}

#[derive(Debug, Clone, Copy)]
struct MutationEntry {
    kind: MutationKind,
    key: i64,
    state: MutationState,
}

/// Pending server confirmation of an optimistic store mutation.
///
/// The local cache already reflects the change when a `Confirmation` is
/// handed out. Awaiting [`confirm`](Self::confirm) resolves it: `Ok` means
/// the server accepted and the cache was reconciled with the authoritative
/// record; `Err` means the cache was rolled back and the error carries the
/// server's message.
pub struct Confirmation<O> {
    mutation_id: Uuid,
    future: BoxFuture<'static, AppResult<O>>,
}

impl<O> Confirmation<O> {
    pub fn mutation_id(&self) -> Uuid {
        self.mutation_id
    }

    pub async fn confirm(self) -> AppResult<O> {
        self.future.await
    }
}

/// Ordered per-entity-type cache backed by a [`RemoteCollection`] loader.
///
/// Mutations apply to the cache synchronously and are forwarded to the
/// remote authority; each returns a [`Confirmation`]. Every cache change
/// bumps a version counter observed by dependent aggregation views. For a
/// single entity the most recently applied local mutation wins in the
/// cache; server-side ordering is not guaranteed and rollbacks never
/// clobber a newer optimistic value.
pub struct EntityStore<T: Entity> {
    inner: Arc<StoreInner<T>>,
}

impl<T: Entity> Clone for EntityStore<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct StoreInner<T: Entity> {
    name: &'static str,
    source: Arc<dyn RemoteCollection<T>>,
    records: RwLock<IndexMap<i64, T>>,
    mutations: DashMap<Uuid, MutationEntry>,
    version: AtomicU64,
    placeholder_seq: AtomicI64,
}

impl<T: Entity> EntityStore<T> {
    pub fn new(name: &'static str, source: Arc<dyn RemoteCollection<T>>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                name,
                source,
                records: RwLock::new(IndexMap::new()),
                mutations: DashMap::new(),
                version: AtomicU64::new(0),
                placeholder_seq: AtomicI64::new(-1),
            }),
        }
    }

    pub fn name(&self) -> &'static str {
        self.inner.name
    }

    /// Replaces the cache with the collection as the server currently
    /// orders it. Returns the record count.
    pub async fn load(&self) -> AppResult<usize> {
        let timed = TimedOperation::new(&format!("load {}", self.inner.name));
        let fetched = self.inner.source.fetch_all().await?;
        let count = fetched.len();
        {
            let mut records = self.inner.records.write();
            records.clear();
            for record in fetched {
                records.insert(record.key(), record);
            }
        }
        self.bump();
        timed.finish_with_info(&format!("{} records", count));
        Ok(count)
    }

    /// Ordered snapshot of the cached collection.
    pub fn snapshot(&self) -> Vec<T> {
        self.inner.records.read().values().cloned().collect()
    }

    pub fn get(&self, id: i64) -> Option<T> {
        self.inner.records.read().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.inner.records.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.records.read().is_empty()
    }

    /// Monotonic counter bumped on every cache change. Aggregation views
    /// use it to decide whether to recompute.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::Relaxed)
    }

    pub fn mutation_state(&self, mutation_id: Uuid) -> Option<MutationState> {
        self.inner
            .mutations
            .get(&mutation_id)
            .map(|entry| entry.state)
    }

    /// Mutations still awaiting confirmation, with their kind and record key.
    pub fn pending_mutations(&self) -> Vec<(Uuid, MutationKind, i64)> {
        self.inner
            .mutations
            .iter()
            .filter(|entry| entry.value().state == MutationState::Pending)
            .map(|entry| (*entry.key(), entry.value().kind, entry.value().key))
            .collect()
    }

    /// Inserts a record into the cache immediately under a client-assigned
    /// placeholder key. The confirmation swaps the placeholder for the
    /// server-assigned record, or removes it again on failure.
    pub fn insert(&self, record: T) -> Confirmation<T> {
        let mutation_id = Uuid::new_v4();
        let placeholder = self.inner.placeholder_seq.fetch_sub(1, Ordering::Relaxed);
        let local = record.with_key(placeholder);

        self.inner
            .records
            .write()
            .insert(placeholder, local.clone());
        self.track(mutation_id, MutationKind::Insert, placeholder);
        self.bump();
        log_debug!(
            "{}: optimistic insert under placeholder {}",
            self.inner.name,
            placeholder
        );

        let store = self.clone();
        let future = async move {
            match store.inner.source.create(&local).await {
                Ok(confirmed) => {
                    {
                        let mut records = store.inner.records.write();
                        records.shift_remove(&placeholder);
                        records.insert(confirmed.key(), confirmed.clone());
                    }
                    store.resolve(mutation_id, MutationState::Committed);
                    store.bump();
                    log_debug!(
                        "{}: insert confirmed, {} replaces placeholder {}",
                        store.inner.name,
                        confirmed.key(),
                        placeholder
                    );
                    Ok(confirmed)
                }
                Err(err) => {
                    store.inner.records.write().shift_remove(&placeholder);
                    store.resolve(mutation_id, MutationState::RolledBack);
                    store.bump();
                    log_warn!(
                        "{}: insert failed, placeholder {} removed: {}",
                        store.inner.name,
                        placeholder,
                        err
                    );
                    Err(err)
                }
            }
        };

        Confirmation {
            mutation_id,
            future: Box::pin(future),
        }
    }

    /// Applies `patcher` to the cached record synchronously and forwards
    /// the patched record to the remote authority. On failure the
    /// pre-mutation value is restored, unless a later mutation already
    /// overwrote the optimistic one.
    pub fn update<F>(&self, id: i64, patcher: F) -> AppResult<Confirmation<T>>
    where
        F: FnOnce(&mut T),
    {
        let mutation_id = Uuid::new_v4();
        let (before, after) = {
            let mut records = self.inner.records.write();
            let record = records.get_mut(&id).ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} {} is not in the local cache",
                    self.inner.name, id
                ))
            })?;
            let before = record.clone();
            patcher(record);
            (before, record.clone())
        };
        self.track(mutation_id, MutationKind::Update, id);
        self.bump();

        let store = self.clone();
        let future = async move {
            match store.inner.source.replace(&after).await {
                Ok(confirmed) => {
                    store
                        .inner
                        .records
                        .write()
                        .insert(confirmed.key(), confirmed.clone());
                    store.resolve(mutation_id, MutationState::Committed);
                    store.bump();
                    Ok(confirmed)
                }
                Err(err) => {
                    store.restore(id, &after, before);
                    store.resolve(mutation_id, MutationState::RolledBack);
                    store.bump();
                    log_warn!("{}: update of {} rolled back: {}", store.inner.name, id, err);
                    Err(err)
                }
            }
        };

        Ok(Confirmation {
            mutation_id,
            future: Box::pin(future),
        })
    }

    /// Removes the record from the cache synchronously. On failure it is
    /// reinserted at its original position.
    pub fn delete(&self, id: i64) -> AppResult<Confirmation<()>> {
        let mutation_id = Uuid::new_v4();
        let (index, removed) = {
            let mut records = self.inner.records.write();
            let (index, _, removed) = records.shift_remove_full(&id).ok_or_else(|| {
                AppError::NotFound(format!(
                    "{} {} is not in the local cache",
                    self.inner.name, id
                ))
            })?;
            (index, removed)
        };
        self.track(mutation_id, MutationKind::Delete, id);
        self.bump();

        let store = self.clone();
        let future = async move {
            match store.inner.source.remove(id).await {
                Ok(()) => {
                    store.resolve(mutation_id, MutationState::Committed);
                    store.bump();
                    Ok(())
                }
                Err(err) => {
                    {
                        let mut records = store.inner.records.write();
                        let index = index.min(records.len());
                        records.shift_insert(index, id, removed);
                    }
                    store.resolve(mutation_id, MutationState::RolledBack);
                    store.bump();
                    log_warn!(
                        "{}: delete of {} rolled back: {}",
                        store.inner.name,
                        id,
                        err
                    );
                    Err(err)
                }
            }
        };

        Ok(Confirmation {
            mutation_id,
            future: Box::pin(future),
        })
    }

    /// Applies a local-only patch without forwarding it anywhere. Returns
    /// the (before, after) pair the caller needs for its own confirmation
    /// and rollback handling, or `None` when the record is not cached.
    ///
    /// This is the entry point for actions that confirm through a custom
    /// endpoint rather than the collection CRUD.
    pub fn mutate_local<F>(&self, id: i64, patcher: F) -> Option<(T, T)>
    where
        F: FnOnce(&mut T),
    {
        let pair = {
            let mut records = self.inner.records.write();
            let record = records.get_mut(&id)?;
            let before = record.clone();
            patcher(record);
            Some((before, record.clone()))
        };
        self.bump();
        pair
    }

    /// Puts `before` back, unless the cached value no longer matches
    /// `expected` — a later mutation overwrote the optimistic one and the
    /// last write wins.
    pub fn restore(&self, id: i64, expected: &T, before: T) {
        let superseded = {
            let mut records = self.inner.records.write();
            match records.get(&id) {
                Some(current) if current == expected => {
                    records.insert(id, before);
                    false
                }
                _ => true,
            }
        };
        if superseded {
            log_debug!(
                "{}: rollback of {} skipped, value was superseded",
                self.inner.name,
                id
            );
        }
        self.bump();
    }

    fn track(&self, mutation_id: Uuid, kind: MutationKind, key: i64) {
        self.inner.mutations.insert(
            mutation_id,
            MutationEntry {
                kind,
                key,
                state: MutationState::Pending,
            },
        );
    }

    fn resolve(&self, mutation_id: Uuid, state: MutationState) {
        if let Some(mut entry) = self.inner.mutations.get_mut(&mutation_id) {
            entry.state = state;
        }
    }

    fn bump(&self) {
        self.inner.version.fetch_add(1, Ordering::Relaxed);
    }
}
