use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::article::domain::Article;
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};

/// Article table access: the shared CRUD surface plus slug lookups.
///
/// Slug lookups return `Ok(None)` on a miss so that only real store
/// failures travel through the error channel.
#[async_trait]
pub trait ArticleRepository: ContentRepository<Article> {
    /// Exact, case-sensitive match.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, ContentRepositoryError>;

    /// Case-insensitive match. Wildcards in `slug` are matched literally.
    async fn find_by_slug_ci(&self, slug: &str)
        -> Result<Option<Article>, ContentRepositoryError>;

    /// Rows whose slug column is `NULL` or empty, oldest first.
    async fn list_without_slug(&self) -> Result<Vec<Article>, ContentRepositoryError>;

    async fn set_slug(&self, id: Uuid, slug: &str) -> Result<(), ContentRepositoryError>;

    async fn set_visibility(&self, id: Uuid, visible: bool)
        -> Result<Article, ContentRepositoryError>;

    /// Case-insensitive; `exclude` skips the article being edited.
    async fn slug_exists(
        &self,
        slug: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ContentRepositoryError>;
}
