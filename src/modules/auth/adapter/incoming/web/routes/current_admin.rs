use actix_web::{get, Responder};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::shared::api::ApiResponse;

#[derive(Serialize, ToSchema)]
pub struct CurrentAdminResponse {
    pub id: Uuid,
    #[schema(example = "owner@example.com")]
    pub email: String,
}

/// Current admin
///
/// Echoes the identity carried by the bearer token.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = inline(SuccessResponse<CurrentAdminResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
#[get("/api/auth/me")]
pub async fn current_admin_handler(admin: AdminUser) -> impl Responder {
    ApiResponse::success(CurrentAdminResponse {
        id: admin.admin_id,
        email: admin.email,
    })
}
