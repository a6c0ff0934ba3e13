use actix_web::{delete, get, patch, post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;
use uuid::Uuid;

use super::error_mapping::{article_error_response, parse_category};
use super::public::{ArticleDetail, ArticleListQuery};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::article::application::ports::incoming::ArticleScope;
use crate::modules::article::domain::{
    Article, ArticleCategory, ArticleFilter, ArticlePatch, NewArticle,
};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;
use crate::shared::patch_field::PatchField;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTOs
// ──────────────────────────────────────────────────────────
//

fn visible_by_default() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateArticleRequest {
    #[schema(example = "Zero-copy parsing in Rust")]
    pub title: String,
    #[serde(default)]
    pub excerpt: String,
    /// Markdown body.
    pub content: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    #[schema(example = "6 min read")]
    pub read_time: String,
    pub category: ArticleCategory,
    /// Derived from the title when omitted.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
}

impl From<CreateArticleRequest> for NewArticle {
    fn from(req: CreateArticleRequest) -> Self {
        NewArticle {
            title: req.title,
            excerpt: req.excerpt,
            content: req.content,
            image_url: req.image_url,
            read_time: req.read_time,
            category: req.category,
            slug: req.slug,
            visible: req.visible,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PatchArticleRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub title: PatchField<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub excerpt: PatchField<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub content: PatchField<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub image_url: PatchField<String>,

    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub read_time: PatchField<String>,

    #[serde(default)]
    #[schema(value_type = Option<ArticleCategory>)]
    pub category: PatchField<ArticleCategory>,

    /// `null` clears the slug so it is derived from the title again.
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub slug: PatchField<String>,

    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub visible: PatchField<bool>,
}

impl From<PatchArticleRequest> for ArticlePatch {
    fn from(req: PatchArticleRequest) -> Self {
        ArticlePatch {
            title: req.title,
            excerpt: req.excerpt,
            content: req.content,
            image_url: req.image_url,
            read_time: req.read_time,
            category: req.category,
            slug: req.slug,
            visible: req.visible,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct VisibilityRequest {
    pub visible: bool,
}

//
// ──────────────────────────────────────────────────────────
// Handlers
// ──────────────────────────────────────────────────────────
//

/// List all articles, hidden ones included
#[utoipa::path(
    get,
    path = "/api/admin/articles",
    tag = "articles",
    params(ArticleListQuery),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Articles", body = inline(SuccessResponse<Vec<Article>>)),
        (status = 400, description = "Unknown category", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[get("/api/admin/articles")]
pub async fn get_admin_articles_handler(
    _admin: AdminUser,
    query: web::Query<ArticleListQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let category = match parse_category(query.category.as_deref()) {
        Ok(category) => category,
        Err(resp) => return resp,
    };

    match data.articles.get_all(ArticleFilter::admin(category)).await {
        Ok(articles) => ApiResponse::success(articles),
        Err(e) => article_error_response(e),
    }
}

/// Read one article by UUID or slug, hidden or not
#[utoipa::path(
    get,
    path = "/api/admin/articles/{id_or_slug}",
    tag = "articles",
    params(("id_or_slug" = String, Path, description = "Article UUID or slug")),
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Article with table of contents", body = inline(SuccessResponse<ArticleDetail>)),
        (status = 404, description = "No article matches", body = ErrorResponse)
    )
)]
#[get("/api/admin/articles/{id_or_slug}")]
pub async fn get_admin_article_handler(
    _admin: AdminUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.articles.resolve(&path, ArticleScope::Admin).await {
        Ok(article) => ApiResponse::success(ArticleDetail::from(article)),
        Err(e) => article_error_response(e),
    }
}

/// Create an article
#[utoipa::path(
    post,
    path = "/api/admin/articles",
    tag = "articles",
    request_body = CreateArticleRequest,
    security(("BearerAuth" = [])),
    responses(
        (status = 201, description = "Article created", body = inline(SuccessResponse<Article>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    )
)]
#[post("/api/admin/articles")]
pub async fn create_article_handler(
    admin: AdminUser,
    req: web::Json<CreateArticleRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.articles.create(req.into_inner().into()).await {
        Ok(article) => {
            info!(admin_id = %admin.admin_id, article_id = %article.id, "Article created");
            ApiResponse::created(article)
        }
        Err(e) => article_error_response(e),
    }
}

/// Update an article
///
/// Omitted fields are kept. Changing the title without sending a slug
/// regenerates the slug.
#[utoipa::path(
    patch,
    path = "/api/admin/articles/{article_id}",
    tag = "articles",
    params(("article_id" = Uuid, Path, description = "Article UUID")),
    request_body = PatchArticleRequest,
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Article updated", body = inline(SuccessResponse<Article>)),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 404, description = "Article not found", body = ErrorResponse),
        (status = 409, description = "Slug already in use", body = ErrorResponse)
    )
)]
#[patch("/api/admin/articles/{article_id}")]
pub async fn patch_article_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<PatchArticleRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .articles
        .update(path.into_inner(), req.into_inner().into())
        .await
    {
        Ok(article) => ApiResponse::success(article),
        Err(e) => article_error_response(e),
    }
}

/// Publish or hide an article
#[utoipa::path(
    patch,
    path = "/api/admin/articles/{article_id}/visibility",
    tag = "articles",
    params(("article_id" = Uuid, Path, description = "Article UUID")),
    request_body = VisibilityRequest,
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Visibility changed", body = inline(SuccessResponse<Article>)),
        (status = 404, description = "Article not found", body = ErrorResponse)
    )
)]
#[patch("/api/admin/articles/{article_id}/visibility")]
pub async fn set_article_visibility_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<VisibilityRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .articles
        .set_visibility(path.into_inner(), req.visible)
        .await
    {
        Ok(article) => ApiResponse::success(article),
        Err(e) => article_error_response(e),
    }
}

/// Delete an article
#[utoipa::path(
    delete,
    path = "/api/admin/articles/{article_id}",
    tag = "articles",
    params(("article_id" = Uuid, Path, description = "Article UUID")),
    security(("BearerAuth" = [])),
    responses(
        (status = 204, description = "Deleted (also when it did not exist)"),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[delete("/api/admin/articles/{article_id}")]
pub async fn delete_article_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.articles.delete(path.into_inner()).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => article_error_response(e),
    }
}
