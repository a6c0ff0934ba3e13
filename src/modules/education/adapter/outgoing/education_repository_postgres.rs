use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::adapter::outgoing::{map_db_err, map_write_err};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};
use crate::modules::education::adapter::outgoing::sea_orm_entity::education::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::education::domain::{Education, EducationPatch, NewEducation};
use crate::shared::patch_field::PatchField;

#[derive(Clone)]
pub struct EducationRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl EducationRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Education> for EducationRepositoryPostgres {
    async fn list(&self, _filter: ()) -> Result<Vec<Education>, ContentRepositoryError> {
        let models = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(models.into_iter().map(Education::from).collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Education, ContentRepositoryError> {
        Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .map(Education::from)
            .ok_or(ContentRepositoryError::NotFound)
    }

    async fn create(
        &self,
        id: Uuid,
        draft: NewEducation,
    ) -> Result<Education, ContentRepositoryError> {
        let now = Utc::now().fixed_offset();

        let model = ActiveModel {
            id: Set(id),
            institution: Set(draft.institution.trim().to_string()),
            degree: Set(draft.degree.trim().to_string()),
            field: Set(draft.field.trim().to_string()),
            start_date: Set(draft.start_date.trim().to_string()),
            end_date: Set(draft.end_date.trim().to_string()),
            description: Set(draft.description),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&*self.db).await.map_err(map_write_err)?;

        Ok(result.into())
    }

    async fn patch(&self, id: Uuid, patch: EducationPatch) -> Result<Education, ContentRepositoryError> {
        let mut model = <ActiveModel as Default>::default();

        if let PatchField::Value(v) = patch.institution {
            model.institution = Set(v.trim().to_string());
        }
        if let PatchField::Value(v) = patch.degree {
            model.degree = Set(v.trim().to_string());
        }
        if let PatchField::Value(v) = patch.field {
            model.field = Set(v.trim().to_string());
        }
        if let PatchField::Value(v) = patch.start_date {
            model.start_date = Set(v.trim().to_string());
        }
        if let PatchField::Value(v) = patch.end_date {
            model.end_date = Set(v.trim().to_string());
        }
        if let PatchField::Value(v) = patch.description {
            model.description = Set(v);
        }

        let has_changes = model.institution.is_set()
            || model.degree.is_set()
            || model.field.is_set()
            || model.start_date.is_set()
            || model.end_date.is_set()
            || model.description.is_set();

        if !has_changes {
            return self.get_by_id(id).await;
        }

        model.updated_at = Set(Utc::now().fixed_offset());

        Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_write_err)?
            .into_iter()
            .next()
            .map(Education::from)
            .ok_or(ContentRepositoryError::NotFound)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError> {
        Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

impl From<education::Model> for Education {
    fn from(model: education::Model) -> Self {
        Education {
            id: model.id,
            institution: model.institution,
            degree: model.degree,
            field: model.field,
            start_date: model.start_date,
            end_date: model.end_date,
            description: model.description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}
