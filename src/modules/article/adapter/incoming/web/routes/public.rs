use actix_web::{get, web, Responder};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::error_mapping::{article_error_response, parse_category};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::article::application::ports::incoming::ArticleScope;
use crate::modules::article::domain::{extract_toc, Article, ArticleFilter, TocHeading};
use crate::shared::api::ApiResponse;
use crate::AppState;

#[derive(Debug, Deserialize, IntoParams)]
pub struct ArticleListQuery {
    /// engineering, tutorial, career or personal
    #[param(example = "tutorial")]
    pub category: Option<String>,
}

/// An article with the table of contents of its body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ArticleDetail {
    #[serde(flatten)]
    pub article: Article,
    pub toc: Vec<TocHeading>,
}

impl From<Article> for ArticleDetail {
    fn from(article: Article) -> Self {
        let toc = extract_toc(&article.content);
        Self { article, toc }
    }
}

/// List published articles
///
/// Visible articles only, newest first.
#[utoipa::path(
    get,
    path = "/api/articles",
    tag = "articles",
    params(ArticleListQuery),
    responses(
        (status = 200, description = "Articles", body = inline(SuccessResponse<Vec<Article>>)),
        (status = 400, description = "Unknown category", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/articles")]
pub async fn get_articles_handler(
    query: web::Query<ArticleListQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let category = match parse_category(query.category.as_deref()) {
        Ok(category) => category,
        Err(resp) => return resp,
    };

    match data.articles.get_all(ArticleFilter::public(category)).await {
        Ok(articles) => ApiResponse::success(articles),
        Err(e) => article_error_response(e),
    }
}

/// Read one published article
///
/// `id_or_slug` is either the article UUID or its slug (matched exactly
/// first, then ignoring case). Hidden articles are reported as not found.
#[utoipa::path(
    get,
    path = "/api/articles/{id_or_slug}",
    tag = "articles",
    params(("id_or_slug" = String, Path, description = "Article UUID or slug")),
    responses(
        (status = 200, description = "Article with table of contents", body = inline(SuccessResponse<ArticleDetail>)),
        (status = 404, description = "No visible article matches", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[get("/api/articles/{id_or_slug}")]
pub async fn get_article_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.articles.resolve(&path, ArticleScope::Public).await {
        Ok(article) => ApiResponse::success(ArticleDetail::from(article)),
        Err(e) => article_error_response(e),
    }
}
