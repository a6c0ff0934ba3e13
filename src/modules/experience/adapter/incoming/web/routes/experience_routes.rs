use actix_web::{delete, get, patch, post, web, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::content::adapter::incoming::web::accessor_error_response;
use crate::modules::experience::domain::{Experience, ExperiencePatch, NewExperience};
use crate::shared::api::ApiResponse;
use crate::shared::patch_field::PatchField;
use crate::shared::tags::TagList;
use crate::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateExperienceRequest {
    pub company: String,
    pub position: String,
    pub period: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: TagList,
}

impl From<CreateExperienceRequest> for NewExperience {
    fn from(req: CreateExperienceRequest) -> Self {
        NewExperience {
            company: req.company,
            position: req.position,
            period: req.period,
            description: req.description,
            technologies: req.technologies.into_inner(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PatchExperienceRequest {
    #[serde(default)]
    pub company: PatchField<String>,
    #[serde(default)]
    pub position: PatchField<String>,
    #[serde(default)]
    pub period: PatchField<String>,
    #[serde(default)]
    pub description: PatchField<String>,
    #[serde(default)]
    pub technologies: PatchField<TagList>,
}

impl From<PatchExperienceRequest> for ExperiencePatch {
    fn from(req: PatchExperienceRequest) -> Self {
        ExperiencePatch {
            company: req.company,
            position: req.position,
            period: req.period,
            description: req.description,
            technologies: req.technologies.map(TagList::into_inner),
        }
    }
}

#[get("/api/experiences")]
pub async fn get_experiences_handler(data: web::Data<AppState>) -> impl Responder {
    match data.experiences.get_all(()).await {
        Ok(items) => ApiResponse::success(items),
        Err(e) => accessor_error_response::<Experience>(e),
    }
}

#[get("/api/experiences/{experience_id}")]
pub async fn get_experience_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.experiences.get_one(path.into_inner()).await {
        Ok(item) => ApiResponse::success(item),
        Err(e) => accessor_error_response::<Experience>(e),
    }
}

#[post("/api/admin/experiences")]
pub async fn create_experience_handler(
    _admin: AdminUser,
    req: web::Json<CreateExperienceRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.experiences.create(req.into_inner().into()).await {
        Ok(item) => ApiResponse::created(item),
        Err(e) => accessor_error_response::<Experience>(e),
    }
}

#[patch("/api/admin/experiences/{experience_id}")]
pub async fn patch_experience_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<PatchExperienceRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .experiences
        .update(path.into_inner(), req.into_inner().into())
        .await
    {
        Ok(item) => ApiResponse::success(item),
        Err(e) => accessor_error_response::<Experience>(e),
    }
}

#[delete("/api/admin/experiences/{experience_id}")]
pub async fn delete_experience_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.experiences.delete(path.into_inner()).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => accessor_error_response::<Experience>(e),
    }
}
