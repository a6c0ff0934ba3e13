use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::content::domain::ContentRecord;
use crate::shared::patch_field::PatchField;

/// A work history entry. `period` is a free-text label ("2021 - Present").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Experience {
    pub id: Uuid,
    pub company: String,
    pub position: String,
    pub period: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExperience {
    pub company: String,
    pub position: String,
    pub period: String,
    pub description: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExperiencePatch {
    pub company: PatchField<String>,
    pub position: PatchField<String>,
    pub period: PatchField<String>,
    pub description: PatchField<String>,
    pub technologies: PatchField<Vec<String>>,
}

impl ContentRecord for Experience {
    type Draft = NewExperience;
    type Patch = ExperiencePatch;
    type Filter = ();

    const KIND: &'static str = "experience";
    const LABEL: &'static str = "Experience";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn validate_draft(draft: &NewExperience) -> Result<(), String> {
        for (field, value) in [
            ("company", &draft.company),
            ("position", &draft.position),
            ("period", &draft.period),
        ] {
            if value.trim().is_empty() {
                return Err(format!("{field} cannot be empty"));
            }
        }
        Ok(())
    }

    fn validate_patch(patch: &ExperiencePatch) -> Result<(), String> {
        patch.company.require_text("company")?;
        patch.position.require_text("position")?;
        patch.period.require_text("period")?;
        if patch.description.is_null() {
            return Err("description cannot be null".to_string());
        }
        patch.technologies.require_list("technologies")
    }
}
