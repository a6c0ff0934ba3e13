use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::modules::article::application::ports::incoming::{ArticleError, ArticleUseCases};
use crate::modules::article::domain::{Article, ArticleFilter};
use crate::modules::content::application::ports::incoming::{AccessorError, ContentAccessor};
use crate::modules::education::domain::Education;
use crate::modules::experience::domain::Experience;
use crate::modules::project::domain::Project;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{section}: {message}")]
pub struct DashboardError {
    pub section: &'static str,
    pub message: String,
}

impl DashboardError {
    fn accessor(section: &'static str, err: AccessorError) -> Self {
        Self {
            section,
            message: err.to_string(),
        }
    }

    fn article(err: ArticleError) -> Self {
        Self {
            section: "articles",
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DashboardCounts {
    pub projects: usize,
    pub articles: usize,
    pub visible_articles: usize,
    pub experiences: usize,
    pub education: usize,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardOverview {
    pub counts: DashboardCounts,
    pub projects: Vec<Project>,
    /// Hidden articles included.
    pub articles: Vec<Article>,
    pub experiences: Vec<Experience>,
    pub education: Vec<Education>,
}

#[async_trait]
pub trait DashboardUseCase: Send + Sync {
    async fn overview(&self) -> Result<DashboardOverview, DashboardError>;
}

pub struct DashboardService {
    projects: Arc<dyn ContentAccessor<Project> + Send + Sync>,
    articles: Arc<dyn ArticleUseCases + Send + Sync>,
    experiences: Arc<dyn ContentAccessor<Experience> + Send + Sync>,
    education: Arc<dyn ContentAccessor<Education> + Send + Sync>,
}

impl DashboardService {
    pub fn new(
        projects: Arc<dyn ContentAccessor<Project> + Send + Sync>,
        articles: Arc<dyn ArticleUseCases + Send + Sync>,
        experiences: Arc<dyn ContentAccessor<Experience> + Send + Sync>,
        education: Arc<dyn ContentAccessor<Education> + Send + Sync>,
    ) -> Self {
        Self {
            projects,
            articles,
            experiences,
            education,
        }
    }
}

#[async_trait]
impl DashboardUseCase for DashboardService {
    /// All four lists are fetched concurrently; the first failure wins.
    async fn overview(&self) -> Result<DashboardOverview, DashboardError> {
        let (projects, articles, experiences, education) = futures::try_join!(
            async {
                self.projects
                    .get_all(())
                    .await
                    .map_err(|e| DashboardError::accessor("projects", e))
            },
            async {
                self.articles
                    .get_all(ArticleFilter::admin(None))
                    .await
                    .map_err(DashboardError::article)
            },
            async {
                self.experiences
                    .get_all(())
                    .await
                    .map_err(|e| DashboardError::accessor("experiences", e))
            },
            async {
                self.education
                    .get_all(())
                    .await
                    .map_err(|e| DashboardError::accessor("education", e))
            },
        )?;

        let counts = DashboardCounts {
            projects: projects.len(),
            articles: articles.len(),
            visible_articles: articles.iter().filter(|a| a.visible).count(),
            experiences: experiences.len(),
            education: education.len(),
        };

        Ok(DashboardOverview {
            counts,
            projects,
            articles,
            experiences,
            education,
        })
    }
}
