use std::marker::PhantomData;

use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::content::application::ports::incoming::{AccessorError, ContentAccessor};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};
use crate::modules::content::domain::ContentRecord;
use crate::shared::retry::retry_once_when;

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

/// Entity accessor for any record kind. Every store call goes through the
/// single-retry wrapper; only transient database failures are retried.
pub struct ContentAccessorService<E, R>
where
    E: ContentRecord,
    R: ContentRepository<E>,
{
    repository: R,
    _record: PhantomData<fn() -> E>,
}

impl<E, R> ContentAccessorService<E, R>
where
    E: ContentRecord,
    R: ContentRepository<E>,
{
    pub fn new(repository: R) -> Self {
        Self {
            repository,
            _record: PhantomData,
        }
    }
}

fn operation<E: ContentRecord>(action: &str) -> String {
    format!("{}.{}", E::KIND, action)
}

#[async_trait]
impl<E, R> ContentAccessor<E> for ContentAccessorService<E, R>
where
    E: ContentRecord,
    R: ContentRepository<E>,
{
    async fn get_all(&self, filter: E::Filter) -> Result<Vec<E>, AccessorError> {
        let repository = &self.repository;

        retry_once_when(
            &operation::<E>("get_all"),
            ContentRepositoryError::is_transient,
            move || repository.list(filter.clone()),
        )
        .await
        .map_err(AccessorError::from)
    }

    async fn get_one(&self, id: Uuid) -> Result<E, AccessorError> {
        let repository = &self.repository;

        retry_once_when(
            &operation::<E>("get_one"),
            ContentRepositoryError::is_transient,
            move || repository.get_by_id(id),
        )
        .await
        .map_err(AccessorError::from)
    }

    async fn create(&self, draft: E::Draft) -> Result<E, AccessorError> {
        E::validate_draft(&draft).map_err(AccessorError::Validation)?;

        // Chosen once so a retried insert that already committed collides
        // on the primary key instead of adding a second row.
        let id = Uuid::new_v4();
        let repository = &self.repository;

        retry_once_when(
            &operation::<E>("create"),
            ContentRepositoryError::is_transient,
            move || repository.create(id, draft.clone()),
        )
        .await
        .map_err(AccessorError::from)
    }

    async fn update(&self, id: Uuid, patch: E::Patch) -> Result<E, AccessorError> {
        E::validate_patch(&patch).map_err(AccessorError::Validation)?;

        let repository = &self.repository;

        retry_once_when(
            &operation::<E>("update"),
            ContentRepositoryError::is_transient,
            move || repository.patch(id, patch.clone()),
        )
        .await
        .map_err(AccessorError::from)
    }

    async fn delete(&self, id: Uuid) -> Result<(), AccessorError> {
        let repository = &self.repository;

        retry_once_when(
            &operation::<E>("delete"),
            ContentRepositoryError::is_transient,
            move || repository.delete(id),
        )
        .await
        .map_err(AccessorError::from)
    }
}
