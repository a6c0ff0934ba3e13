use std::marker::PhantomData;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::modules::article::application::ports::incoming::{
    ArticleError, ArticleScope, ArticleUseCases,
};
use crate::modules::article::domain::{Article, ArticleFilter, ArticlePatch, NewArticle};
use crate::modules::auth::application::use_cases::login_admin::{
    AdminInfo, LoginAdminResponse, LoginAdminUseCase, LoginError, LoginRequest,
};
use crate::modules::content::application::ports::incoming::{AccessorError, ContentAccessor};
use crate::modules::content::domain::ContentRecord;
use crate::modules::dashboard::application::{
    DashboardCounts, DashboardError, DashboardOverview, DashboardUseCase,
};

//
// ──────────────────────────────────────────────────────────
// Content accessors
// ──────────────────────────────────────────────────────────
//

/// In-memory accessor for any content kind.
///
/// `create` hands back the first configured record, `update` the record
/// with the matching id unchanged. A configured error wins over everything.
pub struct StubAccessor<E: ContentRecord> {
    records: Vec<E>,
    error: Option<AccessorError>,
    delay: Option<Duration>,
    _kind: PhantomData<E>,
}

impl<E: ContentRecord> Default for StubAccessor<E> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            error: None,
            delay: None,
            _kind: PhantomData,
        }
    }
}

impl<E: ContentRecord> StubAccessor<E> {
    pub fn with_records(records: Vec<E>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    pub fn failing(error: AccessorError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn settle(&self) -> Result<(), AccessorError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn find(&self, id: Uuid) -> Result<E, AccessorError> {
        self.records
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(AccessorError::NotFound)
    }
}

#[async_trait]
impl<E: ContentRecord> ContentAccessor<E> for StubAccessor<E> {
    async fn get_all(&self, _filter: E::Filter) -> Result<Vec<E>, AccessorError> {
        self.settle().await?;
        Ok(self.records.clone())
    }

    async fn get_one(&self, id: Uuid) -> Result<E, AccessorError> {
        self.settle().await?;
        self.find(id)
    }

    async fn create(&self, _draft: E::Draft) -> Result<E, AccessorError> {
        self.settle().await?;
        self.records
            .first()
            .cloned()
            .ok_or_else(|| AccessorError::StoreFailure("stub has no record to return".into()))
    }

    async fn update(&self, id: Uuid, _patch: E::Patch) -> Result<E, AccessorError> {
        self.settle().await?;
        self.find(id)
    }

    async fn delete(&self, _id: Uuid) -> Result<(), AccessorError> {
        self.settle().await
    }
}

//
// ──────────────────────────────────────────────────────────
// Articles
// ──────────────────────────────────────────────────────────
//

/// In-memory article use cases. Lists honour the filter and `resolve`
/// follows the id, exact slug, then case-insensitive slug order.
#[derive(Default)]
pub struct StubArticles {
    articles: Mutex<Vec<Article>>,
    error: Option<ArticleError>,
    delay: Option<Duration>,
}

impl StubArticles {
    pub fn with_articles(articles: Vec<Article>) -> Self {
        Self {
            articles: Mutex::new(articles),
            ..Self::default()
        }
    }

    pub fn failing(error: ArticleError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    async fn settle(&self) -> Result<(), ArticleError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn snapshot(&self) -> Vec<Article> {
        self.articles.lock().unwrap().clone()
    }
}

#[async_trait]
impl ArticleUseCases for StubArticles {
    async fn get_all(&self, filter: ArticleFilter) -> Result<Vec<Article>, ArticleError> {
        self.settle().await?;
        Ok(self
            .snapshot()
            .into_iter()
            .filter(|a| filter.include_hidden || a.visible)
            .filter(|a| filter.category.map_or(true, |c| a.category == c))
            .collect())
    }

    async fn get_one(&self, id: Uuid) -> Result<Article, ArticleError> {
        self.settle().await?;
        self.snapshot()
            .into_iter()
            .find(|a| a.id == id)
            .ok_or(ArticleError::NotFound)
    }

    async fn resolve(&self, token: &str, scope: ArticleScope) -> Result<Article, ArticleError> {
        self.settle().await?;
        let articles = self.snapshot();
        let by_id = Uuid::parse_str(token)
            .ok()
            .and_then(|id| articles.iter().find(|a| a.id == id));
        let exact = || articles.iter().find(|a| a.slug.as_deref() == Some(token));
        let folded = || {
            articles.iter().find(|a| {
                a.slug
                    .as_deref()
                    .is_some_and(|s| s.eq_ignore_ascii_case(token))
            })
        };

        by_id
            .or_else(exact)
            .or_else(folded)
            .filter(|a| scope == ArticleScope::Admin || a.visible)
            .cloned()
            .ok_or(ArticleError::NotFound)
    }

    async fn create(&self, draft: NewArticle) -> Result<Article, ArticleError> {
        self.settle().await?;
        let now = Utc::now();
        let article = Article {
            id: Uuid::new_v4(),
            slug: draft.slug.or_else(|| Some(draft.title.to_lowercase().replace(' ', "-"))),
            title: draft.title,
            excerpt: draft.excerpt,
            content: draft.content,
            image_url: draft.image_url,
            read_time: draft.read_time,
            category: draft.category,
            visible: draft.visible,
            created_at: now,
            updated_at: now,
        };
        self.articles.lock().unwrap().push(article.clone());
        Ok(article)
    }

    async fn update(&self, id: Uuid, _patch: ArticlePatch) -> Result<Article, ArticleError> {
        self.get_one(id).await
    }

    async fn set_visibility(&self, id: Uuid, visible: bool) -> Result<Article, ArticleError> {
        self.settle().await?;
        let mut articles = self.articles.lock().unwrap();
        let article = articles
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(ArticleError::NotFound)?;
        article.visible = visible;
        Ok(article.clone())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), ArticleError> {
        self.settle().await
    }
}

//
// ──────────────────────────────────────────────────────────
// Auth
// ──────────────────────────────────────────────────────────
//

pub struct StubLoginAdmin {
    result: Result<LoginAdminResponse, LoginError>,
}

impl StubLoginAdmin {
    pub fn succeeding() -> Self {
        Self {
            result: Ok(LoginAdminResponse {
                access_token: "stub.access.token.value".to_string(),
                token_type: "Bearer",
                expires_in: 1800,
                admin: AdminInfo {
                    id: Uuid::new_v4(),
                    email: "owner@example.com".to_string(),
                },
            }),
        }
    }

    pub fn failing(error: LoginError) -> Self {
        Self { result: Err(error) }
    }
}

#[async_trait]
impl LoginAdminUseCase for StubLoginAdmin {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginAdminResponse, LoginError> {
        self.result.clone()
    }
}

//
// ──────────────────────────────────────────────────────────
// Dashboard
// ──────────────────────────────────────────────────────────
//

pub struct StubDashboard {
    result: Result<DashboardOverview, DashboardError>,
}

impl Default for StubDashboard {
    fn default() -> Self {
        Self {
            result: Ok(DashboardOverview {
                counts: DashboardCounts {
                    projects: 0,
                    articles: 0,
                    visible_articles: 0,
                    experiences: 0,
                    education: 0,
                },
                projects: vec![],
                articles: vec![],
                experiences: vec![],
                education: vec![],
            }),
        }
    }
}

impl StubDashboard {
    pub fn with_overview(overview: DashboardOverview) -> Self {
        Self {
            result: Ok(overview),
        }
    }

    pub fn failing(section: &'static str, message: &str) -> Self {
        Self {
            result: Err(DashboardError {
                section,
                message: message.to_string(),
            }),
        }
    }
}

#[async_trait]
impl DashboardUseCase for StubDashboard {
    async fn overview(&self) -> Result<DashboardOverview, DashboardError> {
        self.result.clone()
    }
}

