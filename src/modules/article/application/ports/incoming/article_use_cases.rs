use async_trait::async_trait;
use uuid::Uuid;

use crate::modules::article::domain::{Article, ArticleFilter, ArticlePatch, NewArticle};
use crate::modules::content::application::ports::outgoing::ContentRepositoryError;

//
// ──────────────────────────────────────────────────────────
// Errors
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArticleError {
    #[error("Article not found")]
    NotFound,

    #[error("Slug already in use: {0}")]
    SlugAlreadyExists(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Store failure: {0}")]
    StoreFailure(String),
}

impl From<ContentRepositoryError> for ArticleError {
    fn from(err: ContentRepositoryError) -> Self {
        match err {
            ContentRepositoryError::NotFound => ArticleError::NotFound,
            ContentRepositoryError::Conflict(msg) => ArticleError::SlugAlreadyExists(msg),
            ContentRepositoryError::DatabaseError(msg) => ArticleError::StoreFailure(msg),
            ContentRepositoryError::SerializationError(msg) => ArticleError::StoreFailure(msg),
        }
    }
}

/// Who is asking. Public callers never see hidden articles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArticleScope {
    Public,
    Admin,
}

//
// ──────────────────────────────────────────────────────────
// Incoming Port
// ──────────────────────────────────────────────────────────
//

#[async_trait]
pub trait ArticleUseCases: Send + Sync {
    /// Newest first, every article with a slug.
    async fn get_all(&self, filter: ArticleFilter) -> Result<Vec<Article>, ArticleError>;

    async fn get_one(&self, id: Uuid) -> Result<Article, ArticleError>;

    /// Resolves an id or slug taken from a route path.
    async fn resolve(&self, token: &str, scope: ArticleScope) -> Result<Article, ArticleError>;

    async fn create(&self, draft: NewArticle) -> Result<Article, ArticleError>;

    async fn update(&self, id: Uuid, patch: ArticlePatch) -> Result<Article, ArticleError>;

    async fn set_visibility(&self, id: Uuid, visible: bool) -> Result<Article, ArticleError>;

    async fn delete(&self, id: Uuid) -> Result<(), ArticleError>;
}
