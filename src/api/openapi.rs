use crate::api::schemas::{ErrorDetail, ErrorResponse};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::OpenApi;

use crate::modules::article::adapter::incoming::web::routes::{
    ArticleDetail, CreateArticleRequest, PatchArticleRequest, VisibilityRequest,
};
use crate::modules::article::domain::{Article, ArticleCategory, TocHeading};
use crate::modules::auth::adapter::incoming::web::routes::{
    CurrentAdminResponse, LoginAdminInfo, LoginRequestDto, LoginResponse,
};
use crate::modules::dashboard::application::{DashboardCounts, DashboardOverview};
use crate::modules::education::domain::Education;
use crate::modules::experience::domain::Experience;
use crate::modules::project::domain::Project;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Portfolio API",
        version = "1.0.0",
        description = "Public content and admin endpoints of the portfolio backend",
    ),
    paths(
        // Auth endpoints
        crate::modules::auth::adapter::incoming::web::routes::login_admin_handler,
        crate::modules::auth::adapter::incoming::web::routes::current_admin_handler,

        // Article endpoints
        crate::modules::article::adapter::incoming::web::routes::get_articles_handler,
        crate::modules::article::adapter::incoming::web::routes::get_article_handler,
        crate::modules::article::adapter::incoming::web::routes::get_admin_articles_handler,
        crate::modules::article::adapter::incoming::web::routes::get_admin_article_handler,
        crate::modules::article::adapter::incoming::web::routes::create_article_handler,
        crate::modules::article::adapter::incoming::web::routes::patch_article_handler,
        crate::modules::article::adapter::incoming::web::routes::set_article_visibility_handler,
        crate::modules::article::adapter::incoming::web::routes::delete_article_handler,

        // Dashboard
        crate::modules::dashboard::adapter::incoming::web::routes::get_dashboard_handler,
    ),
    components(
        schemas(
            ErrorResponse,
            ErrorDetail,

            LoginRequestDto,
            LoginResponse,
            LoginAdminInfo,
            CurrentAdminResponse,

            Article,
            ArticleCategory,
            ArticleDetail,
            TocHeading,
            CreateArticleRequest,
            PatchArticleRequest,
            VisibilityRequest,

            DashboardOverview,
            DashboardCounts,
            Project,
            Experience,
            Education,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin authentication"),
        (name = "articles", description = "Articles, public and admin"),
        (name = "dashboard", description = "Admin overview"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "BearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token from /api/auth/login"))
                        .build(),
                ),
            )
        }
    }
}
