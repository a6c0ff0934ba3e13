use actix_web::{delete, get, patch, post, web, Responder};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::auth::adapter::incoming::web::extractors::AdminUser;
use crate::modules::content::adapter::incoming::web::accessor_error_response;
use crate::modules::education::domain::{Education, EducationPatch, NewEducation};
use crate::shared::api::ApiResponse;
use crate::shared::patch_field::PatchField;
use crate::AppState;

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateEducationRequest {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub description: String,
}

impl From<CreateEducationRequest> for NewEducation {
    fn from(req: CreateEducationRequest) -> Self {
        NewEducation {
            institution: req.institution,
            degree: req.degree,
            field: req.field,
            start_date: req.start_date,
            end_date: req.end_date,
            description: req.description,
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct PatchEducationRequest {
    #[serde(default)]
    pub institution: PatchField<String>,
    #[serde(default)]
    pub degree: PatchField<String>,
    #[serde(default)]
    pub field: PatchField<String>,
    #[serde(default)]
    pub start_date: PatchField<String>,
    #[serde(default)]
    pub end_date: PatchField<String>,
    #[serde(default)]
    pub description: PatchField<String>,
}

impl From<PatchEducationRequest> for EducationPatch {
    fn from(req: PatchEducationRequest) -> Self {
        EducationPatch {
            institution: req.institution,
            degree: req.degree,
            field: req.field,
            start_date: req.start_date,
            end_date: req.end_date,
            description: req.description,
        }
    }
}

#[get("/api/education")]
pub async fn get_education_handler(data: web::Data<AppState>) -> impl Responder {
    match data.education.get_all(()).await {
        Ok(items) => ApiResponse::success(items),
        Err(e) => accessor_error_response::<Education>(e),
    }
}

#[get("/api/education/{education_id}")]
pub async fn get_education_entry_handler(
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.education.get_one(path.into_inner()).await {
        Ok(item) => ApiResponse::success(item),
        Err(e) => accessor_error_response::<Education>(e),
    }
}

#[post("/api/admin/education")]
pub async fn create_education_handler(
    _admin: AdminUser,
    req: web::Json<CreateEducationRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.education.create(req.into_inner().into()).await {
        Ok(item) => ApiResponse::created(item),
        Err(e) => accessor_error_response::<Education>(e),
    }
}

#[patch("/api/admin/education/{education_id}")]
pub async fn patch_education_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    req: web::Json<PatchEducationRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data
        .education
        .update(path.into_inner(), req.into_inner().into())
        .await
    {
        Ok(item) => ApiResponse::success(item),
        Err(e) => accessor_error_response::<Education>(e),
    }
}

#[delete("/api/admin/education/{education_id}")]
pub async fn delete_education_handler(
    _admin: AdminUser,
    path: web::Path<Uuid>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.education.delete(path.into_inner()).await {
        Ok(()) => ApiResponse::no_content(),
        Err(e) => accessor_error_response::<Education>(e),
    }
}
