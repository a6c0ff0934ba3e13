use actix_web::{get, web, Responder};
use uuid::Uuid;

use crate::modules::content::adapter::incoming::web::accessor_error_response;
use crate::modules::project::domain::Project;
use crate::shared::api::ApiResponse;
use crate::AppState;

#[get("/api/projects")]
pub async fn get_projects_handler(data: web::Data<AppState>) -> impl Responder {
    match data.projects.get_all(()).await {
        Ok(projects) => ApiResponse::success(projects),
        Err(e) => accessor_error_response::<Project>(e),
    }
}

#[get("/api/projects/{project_id}")]
pub async fn get_project_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.projects.get_one(path.into_inner()).await {
        Ok(project) => ApiResponse::success(project),
        Err(e) => accessor_error_response::<Project>(e),
    }
}
