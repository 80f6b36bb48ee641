use async_trait::async_trait;

use crate::shared::errors::{AppError, AppResult};

/// A record held in an [`EntityStore`](super::EntityStore): a cloneable
/// value type keyed by its integer id.
pub trait Entity: Clone + PartialEq + Send + Sync + 'static {
    /// Stable identifier of the record within its collection.
    fn key(&self) -> i64;

    /// Copy of the record carrying a different key. Used for client-side
    /// placeholder ids on optimistic inserts.
    fn with_key(&self, key: i64) -> Self;
}

/// Remote authority for one entity collection.
///
/// `fetch_all` is the only required operation; collections that never
/// accept writes (levels, grades, subjects, pending teachers) keep the
/// default read-only behavior for the rest.
#[async_trait]
pub trait RemoteCollection<T: Entity>: Send + Sync {
    /// Fetch the full collection in server order.
    async fn fetch_all(&self) -> AppResult<Vec<T>>;

    /// Persist a new record; resolves to the authoritative record with its
    /// server-assigned id.
    async fn create(&self, _record: &T) -> AppResult<T> {
        Err(AppError::InternalError(
            "collection is read-only".to_string(),
        ))
    }

    /// Persist a changed record; resolves to the authoritative record.
    async fn replace(&self, _record: &T) -> AppResult<T> {
        Err(AppError::InternalError(
            "collection is read-only".to_string(),
        ))
    }

    async fn remove(&self, _id: i64) -> AppResult<()> {
        Err(AppError::InternalError(
            "collection is read-only".to_string(),
        ))
    }
}
