use std::sync::Arc;

use actix_web::web;

use crate::modules::article::application::ports::incoming::ArticleUseCases;
use crate::modules::auth::application::use_cases::login_admin::{LoginAdminUseCase, LoginError};
use crate::modules::content::application::ports::incoming::ContentAccessor;
use crate::modules::dashboard::application::DashboardUseCase;
use crate::modules::education::domain::Education;
use crate::modules::experience::domain::Experience;
use crate::modules::project::domain::Project;
use crate::tests::support::stubs::*;
use crate::AppState;

/// Every use case starts as an empty stub; tests swap in the one they
/// exercise.
pub struct TestAppStateBuilder {
    projects: Arc<dyn ContentAccessor<Project> + Send + Sync>,
    experiences: Arc<dyn ContentAccessor<Experience> + Send + Sync>,
    education: Arc<dyn ContentAccessor<Education> + Send + Sync>,
    articles: Arc<dyn ArticleUseCases + Send + Sync>,
    login_admin: Arc<dyn LoginAdminUseCase + Send + Sync>,
    dashboard: Arc<dyn DashboardUseCase + Send + Sync>,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            projects: Arc::new(StubAccessor::<Project>::default()),
            experiences: Arc::new(StubAccessor::<Experience>::default()),
            education: Arc::new(StubAccessor::<Education>::default()),
            articles: Arc::new(StubArticles::default()),
            login_admin: Arc::new(StubLoginAdmin::failing(LoginError::Internal(
                "not used in this test".to_string(),
            ))),
            dashboard: Arc::new(StubDashboard::default()),
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_projects(
        mut self,
        accessor: impl ContentAccessor<Project> + Send + Sync + 'static,
    ) -> Self {
        self.projects = Arc::new(accessor);
        self
    }

    pub fn with_experiences(
        mut self,
        accessor: impl ContentAccessor<Experience> + Send + Sync + 'static,
    ) -> Self {
        self.experiences = Arc::new(accessor);
        self
    }

    pub fn with_education(
        mut self,
        accessor: impl ContentAccessor<Education> + Send + Sync + 'static,
    ) -> Self {
        self.education = Arc::new(accessor);
        self
    }

    pub fn with_articles(mut self, uc: impl ArticleUseCases + Send + Sync + 'static) -> Self {
        self.articles = Arc::new(uc);
        self
    }

    pub fn with_login_admin(mut self, uc: impl LoginAdminUseCase + Send + Sync + 'static) -> Self {
        self.login_admin = Arc::new(uc);
        self
    }

    pub fn with_dashboard(mut self, uc: impl DashboardUseCase + Send + Sync + 'static) -> Self {
        self.dashboard = Arc::new(uc);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        web::Data::new(AppState {
            projects: self.projects,
            experiences: self.experiences,
            education: self.education,
            articles: self.articles,
            login_admin: self.login_admin,
            dashboard: self.dashboard,
        })
    }
}
