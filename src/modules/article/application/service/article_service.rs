use std::sync::LazyLock;

use async_trait::async_trait;
use futures::future::join_all;
use regex::Regex;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::modules::article::application::ports::incoming::{
    ArticleError, ArticleScope, ArticleUseCases,
};
use crate::modules::article::application::ports::outgoing::ArticleRepository;
use crate::modules::article::domain::{Article, ArticleFilter, ArticlePatch, NewArticle};
use crate::modules::content::application::ports::outgoing::ContentRepositoryError;
use crate::modules::content::domain::ContentRecord;
use crate::shared::patch_field::PatchField;
use crate::shared::retry::retry_once_when;
use crate::shared::slug::{has_usable_slug, slug_or_id, slugify};

static UUID_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$")
        .expect("uuid pattern is valid")
});

fn is_uuid_shaped(token: &str) -> bool {
    UUID_SHAPE.is_match(token)
}

fn is_transient(e: &ContentRepositoryError) -> bool {
    e.is_transient()
}

//
// ──────────────────────────────────────────────────────────
// Service
// ──────────────────────────────────────────────────────────
//

pub struct ArticleService<R>
where
    R: ArticleRepository,
{
    repository: R,
}

impl<R> ArticleService<R>
where
    R: ArticleRepository,
{
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    async fn fetch_by_id(&self, id: Uuid) -> Result<Article, ContentRepositoryError> {
        let repository = &self.repository;
        retry_once_when("article.get_by_id", is_transient, move || {
            repository.get_by_id(id)
        })
        .await
    }

    /// Id first (when the token looks like one), then exact slug, then
    /// case-insensitive slug, then the derived slug of rows that have none
    /// stored yet. A miss at every step is `Ok(None)`.
    async fn lookup(&self, token: &str) -> Result<Option<Article>, ArticleError> {
        let repository = &self.repository;

        if is_uuid_shaped(token) {
            if let Ok(id) = Uuid::parse_str(token) {
                match self.fetch_by_id(id).await {
                    Ok(article) => return Ok(Some(article)),
                    Err(ContentRepositoryError::NotFound) => {
                        debug!(token, "No article with this id, trying slug lookup");
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }

        let exact = retry_once_when("article.find_by_slug", is_transient, move || {
            repository.find_by_slug(token)
        })
        .await?;

        if exact.is_some() {
            return Ok(exact);
        }

        let loose = retry_once_when("article.find_by_slug_ci", is_transient, move || {
            repository.find_by_slug_ci(token)
        })
        .await?;

        if loose.is_some() {
            return Ok(loose);
        }

        let unslugged = retry_once_when("article.list_without_slug", is_transient, move || {
            repository.list_without_slug()
        })
        .await?;

        Ok(unslugged
            .into_iter()
            .find(|a| slug_or_id(&a.title, a.id).eq_ignore_ascii_case(token)))
    }

    /// Gives an article without a usable slug one derived from its title and
    /// tries to store it. The read succeeds whether or not the write does.
    async fn ensure_slug(&self, mut article: Article) -> Article {
        if has_usable_slug(article.slug.as_deref()) {
            return article;
        }

        let slug = slug_or_id(&article.title, article.id);

        if let Err(e) = self.repository.set_slug(article.id, &slug).await {
            warn!(
                article_id = %article.id,
                slug = %slug,
                error = %e,
                "Failed to persist backfilled slug"
            );
        }

        article.slug = Some(slug);
        article
    }

    async fn ensure_slug_free(&self, slug: &str, exclude: Option<Uuid>) -> Result<(), ArticleError> {
        let repository = &self.repository;

        let taken = retry_once_when("article.slug_exists", is_transient, move || {
            repository.slug_exists(slug, exclude)
        })
        .await?;

        if taken {
            Err(ArticleError::SlugAlreadyExists(slug.to_string()))
        } else {
            Ok(())
        }
    }

    /// Slug to store for a patch that does not name one explicitly: the new
    /// title's slug when the title actually changes and that slug is free.
    async fn regenerated_slug(&self, id: Uuid, new_title: &str) -> Result<Option<String>, ArticleError> {
        let current = self.fetch_by_id(id).await?;
        if current.title.trim() == new_title.trim() {
            return Ok(None);
        }

        let slug = slugify(new_title);
        if slug.is_empty() {
            return Ok(None);
        }

        match self.ensure_slug_free(&slug, Some(id)).await {
            Ok(()) => Ok(Some(slug)),
            Err(ArticleError::SlugAlreadyExists(_)) => {
                debug!(article_id = %id, slug = %slug, "Regenerated slug taken, keeping current");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

#[async_trait]
impl<R> ArticleUseCases for ArticleService<R>
where
    R: ArticleRepository,
{
    async fn get_all(&self, filter: ArticleFilter) -> Result<Vec<Article>, ArticleError> {
        let repository = &self.repository;

        let articles = retry_once_when("article.get_all", is_transient, move || {
            repository.list(filter.clone())
        })
        .await?;

        Ok(join_all(articles.into_iter().map(|a| self.ensure_slug(a))).await)
    }

    async fn get_one(&self, id: Uuid) -> Result<Article, ArticleError> {
        let article = self.fetch_by_id(id).await?;
        Ok(self.ensure_slug(article).await)
    }

    async fn resolve(&self, token: &str, scope: ArticleScope) -> Result<Article, ArticleError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ArticleError::NotFound);
        }

        let article = self.lookup(token).await?.ok_or(ArticleError::NotFound)?;

        if scope == ArticleScope::Public && !article.visible {
            return Err(ArticleError::NotFound);
        }

        Ok(self.ensure_slug(article).await)
    }

    async fn create(&self, mut draft: NewArticle) -> Result<Article, ArticleError> {
        Article::validate_draft(&draft).map_err(ArticleError::Validation)?;

        let slug = draft
            .slug
            .as_deref()
            .map(slugify)
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| slugify(&draft.title));

        draft.slug = if slug.is_empty() {
            None
        } else {
            self.ensure_slug_free(&slug, None).await?;
            Some(slug)
        };

        let id = Uuid::new_v4();
        let repository = &self.repository;
        let created = retry_once_when("article.create", is_transient, move || {
            repository.create(id, draft.clone())
        })
        .await?;

        Ok(self.ensure_slug(created).await)
    }

    async fn update(&self, id: Uuid, mut patch: ArticlePatch) -> Result<Article, ArticleError> {
        Article::validate_patch(&patch).map_err(ArticleError::Validation)?;

        match &patch.slug {
            PatchField::Value(raw) => {
                let slug = slugify(raw);
                if slug.is_empty() {
                    return Err(ArticleError::Validation(
                        "slug must contain at least one letter or digit".to_string(),
                    ));
                }
                self.ensure_slug_free(&slug, Some(id)).await?;
                patch.slug = PatchField::Value(slug);
            }
            PatchField::Null => {}
            PatchField::Unset => {
                if let PatchField::Value(title) = &patch.title {
                    if let Some(slug) = self.regenerated_slug(id, title).await? {
                        patch.slug = PatchField::Value(slug);
                    }
                }
            }
        }

        let repository = &self.repository;
        let updated = retry_once_when("article.update", is_transient, move || {
            repository.patch(id, patch.clone())
        })
        .await?;

        Ok(self.ensure_slug(updated).await)
    }

    async fn set_visibility(&self, id: Uuid, visible: bool) -> Result<Article, ArticleError> {
        let repository = &self.repository;

        let article = retry_once_when("article.set_visibility", is_transient, move || {
            repository.set_visibility(id, visible)
        })
        .await?;

        Ok(self.ensure_slug(article).await)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ArticleError> {
        let repository = &self.repository;

        retry_once_when("article.delete", is_transient, move || {
            repository.delete(id)
        })
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use mockall::{mock, predicate::*};

    use crate::modules::article::domain::ArticleCategory;
    use crate::modules::content::application::ports::outgoing::ContentRepository;

    mock! {
        pub ArticleRepo {}

        #[async_trait]
        impl ContentRepository<Article> for ArticleRepo {
            async fn list(&self, filter: ArticleFilter) -> Result<Vec<Article>, ContentRepositoryError>;
            async fn get_by_id(&self, id: Uuid) -> Result<Article, ContentRepositoryError>;
            async fn create(&self, id: Uuid, draft: NewArticle) -> Result<Article, ContentRepositoryError>;
            async fn patch(&self, id: Uuid, patch: ArticlePatch) -> Result<Article, ContentRepositoryError>;
            async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError>;
        }

        #[async_trait]
        impl ArticleRepository for ArticleRepo {
            async fn find_by_slug(&self, slug: &str) -> Result<Option<Article>, ContentRepositoryError>;
            async fn find_by_slug_ci(&self, slug: &str) -> Result<Option<Article>, ContentRepositoryError>;
            async fn list_without_slug(&self) -> Result<Vec<Article>, ContentRepositoryError>;
            async fn set_slug(&self, id: Uuid, slug: &str) -> Result<(), ContentRepositoryError>;
            async fn set_visibility(&self, id: Uuid, visible: bool) -> Result<Article, ContentRepositoryError>;
            async fn slug_exists(&self, slug: &str, exclude: Option<Uuid>) -> Result<bool, ContentRepositoryError>;
        }
    }

    fn article(title: &str, slug: Option<&str>) -> Article {
        Article {
            id: Uuid::new_v4(),
            title: title.to_string(),
            excerpt: "excerpt".to_string(),
            content: "# Heading\nbody".to_string(),
            image_url: None,
            read_time: "5 min".to_string(),
            category: ArticleCategory::Engineering,
            slug: slug.map(str::to_string),
            visible: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft(title: &str, slug: Option<&str>) -> NewArticle {
        NewArticle {
            title: title.to_string(),
            excerpt: "excerpt".to_string(),
            content: "body".to_string(),
            image_url: None,
            read_time: "5 min".to_string(),
            category: ArticleCategory::Tutorial,
            slug: slug.map(str::to_string),
            visible: true,
        }
    }

    fn db_down() -> ContentRepositoryError {
        ContentRepositoryError::DatabaseError("connection reset".to_string())
    }

    // =====================================================
    // resolve
    // =====================================================

    #[tokio::test]
    async fn uuid_token_resolves_without_slug_lookup() {
        let stored = article("Hello World", Some("hello-world"));
        let id = stored.id;

        let mut repo = MockArticleRepo::new();
        let returned = stored.clone();
        repo.expect_get_by_id()
            .with(eq(id))
            .times(1)
            .returning(move |_| Ok(returned.clone()));
        repo.expect_find_by_slug().times(0);
        repo.expect_find_by_slug_ci().times(0);

        let service = ArticleService::new(repo);
        let result = service
            .resolve(&id.to_string().to_uppercase(), ArticleScope::Public)
            .await;

        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn slug_token_resolves_by_exact_match() {
        let stored = article("Hello World", Some("hello-world"));

        let mut repo = MockArticleRepo::new();
        repo.expect_get_by_id().times(0);
        let returned = stored.clone();
        repo.expect_find_by_slug()
            .withf(|slug| slug == "hello-world")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));
        repo.expect_find_by_slug_ci().times(0);

        let service = ArticleService::new(repo);
        let result = service.resolve("hello-world", ArticleScope::Public).await;

        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn case_only_difference_resolves_via_fallback() {
        let stored = article("Hello World", Some("hello-world"));

        let mut repo = MockArticleRepo::new();
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        let returned = stored.clone();
        repo.expect_find_by_slug_ci()
            .withf(|slug| slug == "Hello-World")
            .times(1)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = ArticleService::new(repo);
        let result = service.resolve("Hello-World", ArticleScope::Public).await;

        assert_eq!(result.map(|a| a.id), Ok(stored.id));
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let mut repo = MockArticleRepo::new();
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_find_by_slug_ci().returning(|_| Ok(None));
        repo.expect_list_without_slug().returning(|| Ok(vec![]));

        let service = ArticleService::new(repo);
        let result = service.resolve("no-such-article", ArticleScope::Admin).await;

        assert_eq!(result, Err(ArticleError::NotFound));
    }

    #[tokio::test]
    async fn uuid_miss_falls_back_to_slug_lookup() {
        let token = Uuid::new_v4().to_string();

        let mut repo = MockArticleRepo::new();
        repo.expect_get_by_id()
            .times(1)
            .returning(|_| Err(ContentRepositoryError::NotFound));
        repo.expect_find_by_slug().times(1).returning(|_| Ok(None));
        repo.expect_find_by_slug_ci().times(1).returning(|_| Ok(None));
        repo.expect_list_without_slug()
            .times(1)
            .returning(|| Ok(vec![]));

        let service = ArticleService::new(repo);
        let result = service.resolve(&token, ArticleScope::Public).await;

        assert_eq!(result, Err(ArticleError::NotFound));
    }

    #[tokio::test]
    async fn persistent_store_failure_is_not_masked_as_not_found() {
        let mut repo = MockArticleRepo::new();
        repo.expect_find_by_slug()
            .times(2)
            .returning(|_| Err(db_down()));
        repo.expect_find_by_slug_ci().times(0);

        let service = ArticleService::new(repo);
        let result = service.resolve("hello-world", ArticleScope::Public).await;

        assert_eq!(
            result,
            Err(ArticleError::StoreFailure("connection reset".to_string()))
        );
    }

    #[tokio::test]
    async fn transient_lookup_failure_is_retried_once() {
        let stored = article("Hello", Some("hello"));

        let mut repo = MockArticleRepo::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_find_by_slug()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(db_down()));
        let returned = stored.clone();
        repo.expect_find_by_slug()
            .times(1)
            .in_sequence(&mut seq)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = ArticleService::new(repo);
        let result = service.resolve("hello", ArticleScope::Public).await;

        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn hidden_article_is_not_found_publicly_but_visible_to_admin() {
        let mut hidden = article("Draft Post", Some("draft-post"));
        hidden.visible = false;

        let mut repo = MockArticleRepo::new();
        let returned = hidden.clone();
        repo.expect_find_by_slug()
            .times(2)
            .returning(move |_| Ok(Some(returned.clone())));

        let service = ArticleService::new(repo);

        assert_eq!(
            service.resolve("draft-post", ArticleScope::Public).await,
            Err(ArticleError::NotFound)
        );
        assert_eq!(
            service.resolve("draft-post", ArticleScope::Admin).await,
            Ok(hidden)
        );
    }

    // =====================================================
    // lazy slug backfill
    // =====================================================

    #[tokio::test]
    async fn missing_slug_is_backfilled_and_persisted() {
        let stored = article("Hello World!", None);
        let id = stored.id;

        let mut repo = MockArticleRepo::new();
        let returned = stored.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(returned.clone()));
        repo.expect_set_slug()
            .withf(move |got_id, slug| *got_id == id && slug == "hello-world")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ArticleService::new(repo);
        let result = service.resolve(&id.to_string(), ArticleScope::Public).await;

        assert_eq!(result.unwrap().slug.as_deref(), Some("hello-world"));
    }

    #[tokio::test]
    async fn backfill_failure_does_not_fail_the_read_and_is_stable() {
        let stored = article("Hello World!", Some(""));
        let id = stored.id;

        let mut repo = MockArticleRepo::new();
        let returned = stored.clone();
        repo.expect_get_by_id()
            .times(2)
            .returning(move |_| Ok(returned.clone()));
        repo.expect_set_slug()
            .times(2)
            .returning(|_, _| Err(ContentRepositoryError::DatabaseError("read only".to_string())));

        let service = ArticleService::new(repo);

        let first = service.get_one(id).await.unwrap();
        let second = service.get_one(id).await.unwrap();

        assert_eq!(first.slug.as_deref(), Some("hello-world"));
        assert_eq!(second.slug, first.slug);
    }

    #[tokio::test]
    async fn untitled_article_falls_back_to_id_slug() {
        let stored = article("!!!", None);
        let id = stored.id;

        let mut repo = MockArticleRepo::new();
        let returned = stored.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(returned.clone()));
        repo.expect_set_slug().returning(|_, _| Ok(()));

        let service = ArticleService::new(repo);
        let result = service.get_one(id).await.unwrap();

        assert_eq!(result.slug, Some(id.to_string()));
    }

    // =====================================================
    // get_all
    // =====================================================

    #[tokio::test]
    async fn get_all_persists_missing_slugs() {
        let with_slug = article("Kept", Some("kept-slug"));
        let without = article("Needs A Slug", None);
        let without_id = without.id;

        let mut repo = MockArticleRepo::new();
        let rows = vec![with_slug.clone(), without.clone()];
        repo.expect_list()
            .with(eq(ArticleFilter::public(None)))
            .times(1)
            .returning(move |_| Ok(rows.clone()));
        repo.expect_set_slug()
            .withf(move |id, slug| *id == without_id && slug == "needs-a-slug")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = ArticleService::new(repo);
        let articles = service.get_all(ArticleFilter::public(None)).await.unwrap();

        assert_eq!(articles[0].slug.as_deref(), Some("kept-slug"));
        assert_eq!(articles[1].slug.as_deref(), Some("needs-a-slug"));
    }

    #[tokio::test]
    async fn listed_slug_resolves_even_when_backfill_was_not_stored() {
        let legacy = article("Legacy Post", None);
        let legacy_id = legacy.id;

        let mut repo = MockArticleRepo::new();
        let rows = vec![legacy.clone()];
        repo.expect_list().returning(move |_| Ok(rows.clone()));
        repo.expect_set_slug()
            .returning(|_, _| Err(ContentRepositoryError::DatabaseError("read only".to_string())));
        repo.expect_find_by_slug().returning(|_| Ok(None));
        repo.expect_find_by_slug_ci().returning(|_| Ok(None));
        let unslugged = vec![article("Other Post", None), legacy.clone()];
        repo.expect_list_without_slug()
            .times(1)
            .returning(move || Ok(unslugged.clone()));

        let service = ArticleService::new(repo);
        let listed = service.get_all(ArticleFilter::public(None)).await.unwrap();
        let listed_slug = listed[0].slug.clone().unwrap();
        assert_eq!(listed_slug, "legacy-post");

        let resolved = service
            .resolve(&listed_slug, ArticleScope::Public)
            .await
            .unwrap();

        assert_eq!(resolved.id, legacy_id);
        assert_eq!(resolved.slug.as_deref(), Some("legacy-post"));
    }

    #[tokio::test]
    async fn get_all_on_empty_table_is_empty() {
        let mut repo = MockArticleRepo::new();
        repo.expect_list().returning(|_| Ok(vec![]));

        let service = ArticleService::new(repo);

        assert_eq!(service.get_all(ArticleFilter::default()).await, Ok(vec![]));
    }

    // =====================================================
    // create
    // =====================================================

    #[tokio::test]
    async fn create_slugifies_supplied_slug_and_checks_uniqueness() {
        let stored = article("Intro", Some("my-custom-slug"));

        let mut repo = MockArticleRepo::new();
        repo.expect_slug_exists()
            .withf(|slug, exclude| slug == "my-custom-slug" && exclude.is_none())
            .times(1)
            .returning(|_, _| Ok(false));
        let returned = stored.clone();
        repo.expect_create()
            .withf(|_, d| d.slug.as_deref() == Some("my-custom-slug"))
            .times(1)
            .returning(move |_, _| Ok(returned.clone()));

        let service = ArticleService::new(repo);
        let result = service
            .create(draft("Intro", Some("  My Custom Slug! ")))
            .await;

        assert_eq!(result, Ok(stored));
    }

    #[tokio::test]
    async fn create_derives_slug_from_title() {
        let mut repo = MockArticleRepo::new();
        repo.expect_slug_exists().returning(|_, _| Ok(false));
        repo.expect_create()
            .withf(|_, d| d.slug.as_deref() == Some("getting-started-with-rust"))
            .times(1)
            .returning(|_, d| {
                let mut a = article(&d.title, d.slug.as_deref());
                a.category = d.category;
                Ok(a)
            });

        let service = ArticleService::new(repo);
        let result = service
            .create(draft("Getting Started with Rust", None))
            .await
            .unwrap();

        assert_eq!(result.category, ArticleCategory::Tutorial);
    }

    #[tokio::test]
    async fn create_with_taken_slug_is_conflict_before_insert() {
        let mut repo = MockArticleRepo::new();
        repo.expect_slug_exists().returning(|_, _| Ok(true));
        repo.expect_create().times(0);

        let service = ArticleService::new(repo);
        let result = service.create(draft("Hello World", None)).await;

        assert_eq!(
            result,
            Err(ArticleError::SlugAlreadyExists("hello-world".to_string()))
        );
    }

    #[tokio::test]
    async fn create_rejects_blank_title_before_any_store_call() {
        let repo = MockArticleRepo::new();
        let service = ArticleService::new(repo);

        let result = service.create(draft("   ", None)).await;

        assert!(matches!(result, Err(ArticleError::Validation(_))));
    }

    #[tokio::test]
    async fn create_retry_inserts_under_the_same_id() {
        let seen = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));

        let mut repo = MockArticleRepo::new();
        repo.expect_slug_exists().returning(|_, _| Ok(false));
        let log = std::sync::Arc::clone(&seen);
        let mut attempt = 0;
        repo.expect_create().times(2).returning(move |id, d| {
            log.lock().unwrap().push(id);
            attempt += 1;
            if attempt == 1 {
                Err(db_down())
            } else {
                let mut a = article(&d.title, d.slug.as_deref());
                a.id = id;
                Ok(a)
            }
        });

        let service = ArticleService::new(repo);
        let created = service.create(draft("Hello", None)).await.unwrap();

        let ids = seen.lock().unwrap().clone();
        assert_eq!(ids.len(), 2);
        assert_eq!(ids[0], ids[1]);
        assert_eq!(created.id, ids[0]);
    }

    #[tokio::test]
    async fn create_race_on_unique_index_is_conflict() {
        let mut repo = MockArticleRepo::new();
        repo.expect_slug_exists().returning(|_, _| Ok(false));
        repo.expect_create()
            .times(1)
            .returning(|_, _| Err(ContentRepositoryError::Conflict("duplicate key".to_string())));

        let service = ArticleService::new(repo);
        let result = service.create(draft("Hello", None)).await;

        assert!(matches!(result, Err(ArticleError::SlugAlreadyExists(_))));
    }

    // =====================================================
    // update
    // =====================================================

    #[tokio::test]
    async fn title_change_regenerates_slug() {
        let current = article("Old Title", Some("old-title"));
        let id = current.id;

        let mut repo = MockArticleRepo::new();
        let returned = current.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(returned.clone()));
        repo.expect_slug_exists()
            .withf(move |slug, exclude| slug == "new-title" && *exclude == Some(id))
            .returning(|_, _| Ok(false));
        repo.expect_patch()
            .withf(|_, p| p.slug == PatchField::Value("new-title".to_string()))
            .times(1)
            .returning(|_, _| Ok(article("New Title", Some("new-title"))));

        let service = ArticleService::new(repo);
        let patch = ArticlePatch {
            title: PatchField::Value("New Title".to_string()),
            ..Default::default()
        };

        let result = service.update(id, patch).await.unwrap();

        assert_eq!(result.slug.as_deref(), Some("new-title"));
    }

    #[tokio::test]
    async fn unchanged_title_keeps_hand_edited_slug() {
        let current = article("Same Title", Some("custom"));
        let id = current.id;

        let mut repo = MockArticleRepo::new();
        let returned = current.clone();
        repo.expect_get_by_id()
            .returning(move |_| Ok(returned.clone()));
        repo.expect_slug_exists().times(0);
        let updated = current.clone();
        repo.expect_patch()
            .withf(|_, p| p.slug.is_unset())
            .returning(move |_, _| Ok(updated.clone()));

        let service = ArticleService::new(repo);
        let patch = ArticlePatch {
            title: PatchField::Value("Same Title".to_string()),
            ..Default::default()
        };

        let result = service.update(id, patch).await.unwrap();

        assert_eq!(result.slug.as_deref(), Some("custom"));
    }

    #[tokio::test]
    async fn update_with_unusable_slug_is_validation_error() {
        let repo = MockArticleRepo::new();
        let service = ArticleService::new(repo);

        let patch = ArticlePatch {
            slug: PatchField::Value("@@@".to_string()),
            ..Default::default()
        };

        let result = service.update(Uuid::new_v4(), patch).await;

        assert!(matches!(result, Err(ArticleError::Validation(_))));
    }

    #[tokio::test]
    async fn update_missing_article_is_not_found() {
        let mut repo = MockArticleRepo::new();
        repo.expect_patch()
            .returning(|_, _| Err(ContentRepositoryError::NotFound));

        let service = ArticleService::new(repo);
        let patch = ArticlePatch {
            excerpt: PatchField::Value("new".to_string()),
            ..Default::default()
        };

        let result = service.update(Uuid::new_v4(), patch).await;

        assert_eq!(result, Err(ArticleError::NotFound));
    }

    // =====================================================
    // visibility / delete
    // =====================================================

    #[tokio::test]
    async fn set_visibility_returns_article_with_slug() {
        let mut hidden = article("Toggle Me", None);
        hidden.visible = false;
        let id = hidden.id;

        let mut repo = MockArticleRepo::new();
        repo.expect_set_visibility()
            .with(eq(id), eq(false))
            .times(1)
            .returning(move |_, _| Ok(hidden.clone()));
        repo.expect_set_slug().returning(|_, _| Ok(()));

        let service = ArticleService::new(repo);
        let result = service.set_visibility(id, false).await.unwrap();

        assert!(!result.visible);
        assert_eq!(result.slug.as_deref(), Some("toggle-me"));
    }

    #[tokio::test]
    async fn delete_retries_transient_failure() {
        let mut repo = MockArticleRepo::new();
        let mut seq = mockall::Sequence::new();
        repo.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(db_down()));
        repo.expect_delete()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));

        let service = ArticleService::new(repo);

        assert_eq!(service.delete(Uuid::new_v4()).await, Ok(()));
    }

    #[test]
    fn uuid_shape_is_case_insensitive_and_strict() {
        assert!(is_uuid_shaped("123E4567-E89B-12D3-A456-426614174000"));
        assert!(!is_uuid_shaped("123e4567e89b12d3a456426614174000"));
        assert!(!is_uuid_shaped("hello-world"));
    }
}
