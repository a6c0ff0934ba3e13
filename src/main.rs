pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

#[cfg(test)]
mod tests;

use crate::api::openapi::ApiDoc;
use crate::config::AppConfig;
use crate::modules::article::adapter::outgoing::ArticleRepositoryPostgres;
use crate::modules::article::application::ports::incoming::ArticleUseCases;
use crate::modules::article::application::service::ArticleService;
use crate::modules::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::modules::auth::adapter::outgoing::security::Argon2Hasher;
use crate::modules::auth::adapter::outgoing::{
    AdminQueryPostgres, AdminRepositoryPostgres, InMemoryLoginAttemptStore,
    RedisLoginAttemptStore,
};
use crate::modules::auth::application::ports::outgoing::{
    LoginAttemptStore, PasswordHasher, TokenProvider,
};
use crate::modules::auth::application::services::LoginRateLimiter;
use crate::modules::auth::application::use_cases::bootstrap_admin::{
    BootstrapAdmin, BootstrapOutcome,
};
use crate::modules::auth::application::use_cases::login_admin::{
    LoginAdminService, LoginAdminUseCase,
};
use crate::modules::content::application::ports::incoming::ContentAccessor;
use crate::modules::content::application::service::ContentAccessorService;
use crate::modules::dashboard::application::{DashboardService, DashboardUseCase};
use crate::modules::education::adapter::outgoing::EducationRepositoryPostgres;
use crate::modules::education::domain::Education;
use crate::modules::experience::adapter::outgoing::ExperienceRepositoryPostgres;
use crate::modules::experience::domain::Experience;
use crate::modules::project::adapter::outgoing::ProjectRepositoryPostgres;
use crate::modules::project::domain::Project;
use crate::shared::api::{custom_json_config, custom_path_config, custom_query_config};

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use deadpool_redis::{Config as RedisConfig, Runtime};
use sea_orm::{ConnectOptions, Database};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
pub struct AppState {
    pub projects: Arc<dyn ContentAccessor<Project> + Send + Sync>,
    pub experiences: Arc<dyn ContentAccessor<Experience> + Send + Sync>,
    pub education: Arc<dyn ContentAccessor<Education> + Send + Sync>,
    pub articles: Arc<dyn ArticleUseCases + Send + Sync>,
    pub login_admin: Arc<dyn LoginAdminUseCase + Send + Sync>,
    pub dashboard: Arc<dyn DashboardUseCase + Send + Sync>,
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Try .env.{environment} first, then fall back to .env
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
    if dotenvy::from_filename(format!(".env.{env}")).is_err() {
        dotenvy::dotenv().ok();
    }

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(environment = %env, "Starting application...");

    // Database connection
    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db = Arc::new(
        Database::connect(opt)
            .await
            .context("failed to connect to database")?,
    );

    // Login-attempt store: shared across instances when Redis is configured
    let attempt_store: Arc<dyn LoginAttemptStore> = match &config.redis_url {
        Some(url) => {
            let pool = RedisConfig::from_url(url)
                .create_pool(Some(Runtime::Tokio1))
                .context("failed to create Redis pool")?;
            info!("Login attempts tracked in Redis");
            Arc::new(RedisLoginAttemptStore::new(
                Arc::new(pool),
                config.login_lockout_secs,
            ))
        }
        None => {
            warn!("REDIS_URL not set; login attempts are tracked per process");
            Arc::new(InMemoryLoginAttemptStore::with_ttl(
                chrono::Duration::seconds(config.login_lockout_secs),
            ))
        }
    };

    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(Argon2Hasher::from_env().context("invalid Argon2 parameters")?);
    let jwt_service = Arc::new(JwtTokenService::new(config.jwt.clone()));

    if let Some(admin) = &config.bootstrap_admin {
        let bootstrap = BootstrapAdmin::new(
            AdminQueryPostgres::new(Arc::clone(&db)),
            AdminRepositoryPostgres::new(Arc::clone(&db)),
            Arc::clone(&hasher),
        );
        match bootstrap
            .ensure(&admin.email, &admin.password)
            .await
            .context("failed to bootstrap admin account")?
        {
            BootstrapOutcome::Created => info!("Admin account created from ADMIN_EMAIL"),
            BootstrapOutcome::AlreadyPresent => info!("Admin account already present"),
        }
    }

    let limiter = LoginRateLimiter::new(
        attempt_store,
        config.login_max_attempts,
        chrono::Duration::seconds(config.login_lockout_secs),
    );
    let login_admin = LoginAdminService::new(
        AdminQueryPostgres::new(Arc::clone(&db)),
        hasher,
        jwt_service.clone(),
        limiter,
    );

    let projects: Arc<dyn ContentAccessor<Project> + Send + Sync> = Arc::new(
        ContentAccessorService::new(ProjectRepositoryPostgres::new(Arc::clone(&db))),
    );
    let experiences: Arc<dyn ContentAccessor<Experience> + Send + Sync> = Arc::new(
        ContentAccessorService::new(ExperienceRepositoryPostgres::new(Arc::clone(&db))),
    );
    let education: Arc<dyn ContentAccessor<Education> + Send + Sync> = Arc::new(
        ContentAccessorService::new(EducationRepositoryPostgres::new(Arc::clone(&db))),
    );
    let articles: Arc<dyn ArticleUseCases + Send + Sync> = Arc::new(ArticleService::new(
        ArticleRepositoryPostgres::new(Arc::clone(&db)),
    ));

    let dashboard = DashboardService::new(
        Arc::clone(&projects),
        Arc::clone(&articles),
        Arc::clone(&experiences),
        Arc::clone(&education),
    );

    let state = AppState {
        projects,
        experiences,
        education,
        articles,
        login_admin: Arc::new(login_admin),
        dashboard: Arc::new(dashboard),
    };

    let token_provider: Arc<dyn TokenProvider + Send + Sync> = jwt_service;
    let server_url = config.bind_address();
    info!(address = %server_url, "Server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(custom_json_config())
            .app_data(custom_path_config())
            .app_data(custom_query_config())
            .configure(init_routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind(&server_url)
    .with_context(|| format!("failed to bind {server_url}"))?
    .run()
    .await
    .context("server error")
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::modules::article::adapter::incoming::web::routes as articles;
    use crate::modules::auth::adapter::incoming::web::routes as auth;
    use crate::modules::dashboard::adapter::incoming::web::routes as dashboard;
    use crate::modules::education::adapter::incoming::web::routes as education;
    use crate::modules::experience::adapter::incoming::web::routes as experiences;
    use crate::modules::project::adapter::incoming::web::routes as projects;

    // Health
    cfg.service(crate::health::health);
    cfg.service(crate::health::readiness);
    // Auth
    cfg.service(auth::login_admin_handler);
    cfg.service(auth::current_admin_handler);
    // Projects
    cfg.service(projects::get_projects_handler);
    cfg.service(projects::get_project_handler);
    cfg.service(projects::create_project_handler);
    cfg.service(projects::patch_project_handler);
    cfg.service(projects::delete_project_handler);
    // Experiences
    cfg.service(experiences::get_experiences_handler);
    cfg.service(experiences::get_experience_handler);
    cfg.service(experiences::create_experience_handler);
    cfg.service(experiences::patch_experience_handler);
    cfg.service(experiences::delete_experience_handler);
    // Education
    cfg.service(education::get_education_handler);
    cfg.service(education::get_education_entry_handler);
    cfg.service(education::create_education_handler);
    cfg.service(education::patch_education_handler);
    cfg.service(education::delete_education_handler);
    // Articles
    cfg.service(articles::get_articles_handler);
    cfg.service(articles::get_article_handler);
    cfg.service(articles::get_admin_articles_handler);
    cfg.service(articles::get_admin_article_handler);
    cfg.service(articles::create_article_handler);
    cfg.service(articles::patch_article_handler);
    cfg.service(articles::set_article_visibility_handler);
    cfg.service(articles::delete_article_handler);
    // Dashboard
    cfg.service(dashboard::get_dashboard_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e:#}");
        std::process::exit(1);
    }
}
