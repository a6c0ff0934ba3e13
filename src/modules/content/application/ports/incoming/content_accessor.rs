use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::content::application::ports::outgoing::ContentRepositoryError;
use crate::modules::content::domain::ContentRecord;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessorError {
    #[error("not found")]
    NotFound,

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("store failure: {0}")]
    StoreFailure(String),
}

impl From<ContentRepositoryError> for AccessorError {
    fn from(err: ContentRepositoryError) -> Self {
        match err {
            ContentRepositoryError::NotFound => AccessorError::NotFound,
            ContentRepositoryError::Conflict(msg) => AccessorError::Conflict(msg),
            ContentRepositoryError::DatabaseError(msg) => AccessorError::StoreFailure(msg),
            ContentRepositoryError::SerializationError(msg) => AccessorError::StoreFailure(msg),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ContentAccessor<E>: Send + Sync
where
    E: ContentRecord,
{
    async fn get_all(&self, filter: E::Filter) -> Result<Vec<E>, AccessorError>;

    async fn get_one(&self, id: Uuid) -> Result<E, AccessorError>;

    async fn create(&self, draft: E::Draft) -> Result<E, AccessorError>;

    async fn update(&self, id: Uuid, patch: E::Patch) -> Result<E, AccessorError>;

    async fn delete(&self, id: Uuid) -> Result<(), AccessorError>;
}
