use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::content::domain::ContentRecord;
use crate::shared::patch_field::PatchField;

/// Start and end dates are display labels, not parsed dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Education {
    pub id: Uuid,
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEducation {
    pub institution: String,
    pub degree: String,
    pub field: String,
    pub start_date: String,
    pub end_date: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EducationPatch {
    pub institution: PatchField<String>,
    pub degree: PatchField<String>,
    pub field: PatchField<String>,
    pub start_date: PatchField<String>,
    pub end_date: PatchField<String>,
    pub description: PatchField<String>,
}

impl ContentRecord for Education {
    type Draft = NewEducation;
    type Patch = EducationPatch;
    type Filter = ();

    const KIND: &'static str = "education";
    const LABEL: &'static str = "Education";

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn validate_draft(draft: &NewEducation) -> Result<(), String> {
        if draft.institution.trim().is_empty() {
            return Err("institution cannot be empty".to_string());
        }
        if draft.degree.trim().is_empty() {
            return Err("degree cannot be empty".to_string());
        }
        Ok(())
    }

    fn validate_patch(patch: &EducationPatch) -> Result<(), String> {
        patch.institution.require_text("institution")?;
        patch.degree.require_text("degree")?;

        // Remaining columns are NOT NULL but may hold empty labels.
        for (field, value) in [
            ("field", &patch.field),
            ("start_date", &patch.start_date),
            ("end_date", &patch.end_date),
            ("description", &patch.description),
        ] {
            if value.is_null() {
                return Err(format!("{field} cannot be null"));
            }
        }
        Ok(())
    }
}
