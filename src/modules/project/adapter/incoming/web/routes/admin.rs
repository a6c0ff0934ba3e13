use actix_web::{delete, patch, post, web, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::content::adapter::incoming::web::accessor_error_response;
use crate::modules::project::domain::{NewProject, Project, ProjectPatch};
use crate::shared::api::ApiResponse;
use crate::shared::patch_field::PatchField;
use crate::shared::tags::TagList;
use crate::AppState;

//
// ──────────────────────────────────────────────────────────
// Request DTOs
// ──────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    /// JSON array or comma-separated string.
    #[serde(default)]
    pub tags: TagList,
}

impl From<CreateProjectRequest> for NewProject {
    fn from(req: CreateProjectRequest) -> Self {
        NewProject {
            title: req.title,
            description: req.description,
            image_url: req.image_url,
            github_url: req.github_url,
            tags: req.tags.into_inner(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PatchProjectRequest {
    #[serde(default)]
    pub title: PatchField<String>,

    #[serde(default)]
    pub description: PatchField<String>,

    #[serde(default)]
    pub image_url: PatchField<String>,

    #[serde(default)]
    pub github_url: PatchField<String>,

    #[serde(default)]
    pub tags: PatchField<TagList>,
}

impl From<PatchProjectRequest> for ProjectPatch {
    fn from(req: PatchProjectRequest) -> Self {
        ProjectPatch {
            title: req.title,
            description: req.description,
            image_url: req.image_url,
            github_url: req.github_url,
            tags: req.tags.map(TagList::into_inner),
        }
    }
}

//
// ──────────────────────────────────────────────────────────
// Handlers
// ──────────────────────────────────────────────────────────
//

#[post("/api/admin/projects")]
pub async fn create_project_handler(
    _admin: AdminUser,
    req: web::Json<CreateProjectRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.projects.create(req.into_inner().into()).await {
        Ok(project) => ApiResponse::created(project),
        Err(e) => accessor_error_response::<Project>(e),
    }
}

#[patch("/api/admin/projects/{project_id}")]
pub async fn patch_project_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<PatchProjectRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .projects
        .update(path.into_inner(), req.into_inner().into())
        .await
    {
        Ok(project) => ApiResponse::success(project),
        Err(e) => accessor_error_response::<Project>(e),
    }
}

#[delete("/api/admin/projects/{project_id}")]
pub async fn delete_project_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.projects.delete(path.into_inner()).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => accessor_error_response::<Project>(e),
    }
}
