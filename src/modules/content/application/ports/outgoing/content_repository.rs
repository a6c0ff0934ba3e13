// src/modules/content/application/ports/outgoing/content_repository.rs

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::content::domain::ContentRecord;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentRepositoryError {
    #[error("Record not found")]
    NotFound,

    /// Unique constraint violated (e.g. article slug).
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ContentRepositoryError {
    /// Only connection/driver level failures are worth a second attempt.
    pub fn is_transient(&self) -> bool {
        matches!(self, ContentRepositoryError::DatabaseError(_))
    }
}

//
// ──────────────────────────────────────────────────────────
// Port (one table per record kind)
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ContentRepository<E>: Send + Sync
where
    E: ContentRecord,
{
    /// All matching records, newest `created_at` first. Empty is `Ok(vec![])`.
    async fn list(&self, filter: E::Filter) -> Result<Vec<E>, ContentRepositoryError>;

    async fn get_by_id(&self, id: Uuid) -> Result<E, ContentRepositoryError>;

    /// Inserts under the caller-chosen `id`; the store assigns both
    /// timestamps. Reusing an id that already exists is a `Conflict`.
    async fn create(&self, id: Uuid, draft: E::Draft) -> Result<E, ContentRepositoryError>;

    /// Merges the provided fields; `NotFound` when the id does not exist.
    async fn patch(&self, id: Uuid, patch: E::Patch) -> Result<E, ContentRepositoryError>;

    /// Deleting a missing id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError>;
}
