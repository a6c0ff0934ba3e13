use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::dashboard::application::DashboardOverview;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Admin dashboard
///
/// Counts plus the full lists of every content kind, hidden articles
/// included. Fails as a whole when any section cannot be loaded.
#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    tag = "dashboard",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Overview", body = inline(SuccessResponse<DashboardOverview>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 500, description = "A section failed to load", body = ErrorResponse)
    )
)]
#[get("/api/admin/dashboard")]
pub async fn get_dashboard_handler(admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    match data.dashboard.overview().await {
        Ok(overview) => ApiResponse::success(overview),
        Err(e) => {
            error!(admin_id = %admin.admin_id, section = e.section, error = %e.message, "Dashboard load failed");
            ApiResponse::internal_error()
        }
    }
}
