use actix_web::HttpResponse;
use tracing::error;

use crate::modules::article::application::ports::incoming::ArticleError;
use crate::modules::article::domain::ArticleCategory;
use crate::shared::api::ApiResponse;

pub(super) fn article_error_response(err: ArticleError) -> HttpResponse {
    match err {
        ArticleError::NotFound => ApiResponse::not_found("ARTICLE_NOT_FOUND", "Article not found"),

        ArticleError::SlugAlreadyExists(slug) => ApiResponse::conflict(
            "SLUG_ALREADY_EXISTS",
            &format!("Slug '{slug}' is already used by another article"),
        ),

        ArticleError::Validation(msg) => ApiResponse::bad_request("VALIDATION_ERROR", &msg),

        ArticleError::StoreFailure(msg) => {
            error!(error = %msg, "Article store failure");
            ApiResponse::internal_error()
        }
    }
}

/// `?category=` is optional; a present but blank value means "all".
pub(super) fn parse_category(raw: Option<&str>) -> Result<Option<ArticleCategory>, HttpResponse> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        None => Ok(None),
        Some(value) => value
            .parse()
            .map(Some)
            .map_err(|msg: String| ApiResponse::bad_request("INVALID_CATEGORY", &msg)),
    }
}
