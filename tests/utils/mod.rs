//! Shared test doubles: an in-memory remote backend standing in for the
//! REST authority.
#![allow(dead_code)]

pub mod factories;

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;

use qalam_admin::modules::taxonomy::infrastructure::CurriculumRemote;
use qalam_admin::modules::taxonomy::Curriculum;
use qalam_admin::shared::errors::{AppError, AppResult};
use qalam_admin::shared::store::RemoteCollection;
use qalam_admin::Entity;

/// In-memory collection backend. Writes mutate the "server" state and
/// return authoritative records (ids assigned on create); `fail_next_write`
/// makes the next write resolve the way a `succeeded: false` envelope
/// does — an `ApiError` carrying the server message.
pub struct FakeCollection<T: Entity> {
    records: Mutex<Vec<T>>,
    next_id: AtomicI64,
    fail_writes: AtomicBool,
}

impl<T: Entity> FakeCollection<T> {
    pub fn new(seed: Vec<T>) -> Arc<Self> {
        let max_id = seed.iter().map(|r| r.key()).max().unwrap_or(0);
        Arc::new(Self {
            records: Mutex::new(seed),
            next_id: AtomicI64::new(max_id + 1),
            fail_writes: AtomicBool::new(false),
        })
    }

    pub fn fail_next_write(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    /// Current server-side records.
    pub fn records(&self) -> Vec<T> {
        self.records.lock().clone()
    }

    /// Server-side edit outside the client's mutation paths.
    pub fn mutate(&self, id: i64, patch: impl FnOnce(&mut T)) -> AppResult<T> {
        let mut records = self.records.lock();
        let record = records
            .iter_mut()
            .find(|r| r.key() == id)
            .ok_or_else(|| AppError::NotFound(format!("record {} is not on the server", id)))?;
        patch(record);
        Ok(record.clone())
    }

    fn check_fail(&self) -> AppResult<()> {
        if self.fail_writes.swap(false, Ordering::SeqCst) {
            Err(AppError::ApiError("Operation was rejected".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl<T: Entity> RemoteCollection<T> for FakeCollection<T> {
    async fn fetch_all(&self) -> AppResult<Vec<T>> {
        Ok(self.records())
    }

    async fn create(&self, record: &T) -> AppResult<T> {
        self.check_fail()?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let confirmed = record.with_key(id);
        self.records.lock().push(confirmed.clone());
        Ok(confirmed)
    }

    async fn replace(&self, record: &T) -> AppResult<T> {
        self.check_fail()?;
        let mut records = self.records.lock();
        let slot = records
            .iter_mut()
            .find(|r| r.key() == record.key())
            .ok_or_else(|| {
                AppError::NotFound(format!("record {} is not on the server", record.key()))
            })?;
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn remove(&self, id: i64) -> AppResult<()> {
        self.check_fail()?;
        let mut records = self.records.lock();
        let len_before = records.len();
        records.retain(|r| r.key() != id);
        if records.len() == len_before {
            return Err(AppError::NotFound(format!(
                "record {} is not on the server",
                id
            )));
        }
        Ok(())
    }
}

/// Fake toggle-status endpoint over the same backing collection.
pub struct FakeCurriculumRemote {
    backend: Arc<FakeCollection<Curriculum>>,
    fail_next: AtomicBool,
}

impl FakeCurriculumRemote {
    pub fn new(backend: Arc<FakeCollection<Curriculum>>) -> Self {
        Self {
            backend,
            fail_next: AtomicBool::new(false),
        }
    }

    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl CurriculumRemote for FakeCurriculumRemote {
    async fn toggle_status(&self, record: &Curriculum) -> AppResult<Curriculum> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::ApiError(
                "Curriculum status could not be changed".to_string(),
            ));
        }
        self.backend
            .mutate(record.key(), |c| c.is_active = !c.is_active)
    }
}
