use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::content::domain::ContentRecord;
use crate::shared::patch_field::PatchField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub github_url: Option<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: PatchField<String>,
    pub description: PatchField<String>,
    pub image_url: PatchField<String>,
    pub github_url: PatchField<String>,
    pub tags: PatchField<Vec<String>>,
}

impl ContentRecord for Project {
    type Draft = NewProject;
    type Patch = ProjectPatch;
    type Filter = ();

    const KIND: &'static str = "project";
    const LABEL: &'static str = "Project";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn validate_draft(draft: &NewProject) -> Result<(), String> {
        if draft.title.trim().is_empty() {
            return Err("title cannot be empty".to_string());
        }
        if draft.description.trim().is_empty() {
            return Err("description cannot be empty".to_string());
        }
        Ok(())
    }

    fn validate_patch(patch: &ProjectPatch) -> Result<(), String> {
        patch.title.require_text("title")?;
        patch.description.require_text("description")?;
        patch.tags.require_list("tags")
    }
}
