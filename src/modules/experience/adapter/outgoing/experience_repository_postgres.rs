use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::modules::content::adapter::outgoing::{from_json, map_db_err, map_write_err, to_json};
use crate::modules::content::application::ports::outgoing::{
    ContentRepository, ContentRepositoryError,
};
use crate::modules::experience::adapter::outgoing::sea_orm_entity::experiences::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::experience::domain::{Experience, ExperiencePatch, NewExperience};
use crate::shared::patch_field::PatchField;

#[derive(Clone)]
pub struct ExperienceRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ExperienceRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Experience> for ExperienceRepositoryPostgres {
    async fn list(&self, _filter: ()) -> Result<Vec<Experience>, ContentRepositoryError> {
        Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(model_to_experience)
            .collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Experience, ContentRepositoryError> {
        let model = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_experience(model)
    }

    async fn create(
        &self,
        id: Uuid,
        draft: NewExperience,
    ) -> Result<Experience, ContentRepositoryError> {
        let now = Utc::now().fixed_offset();

        let model = ActiveModel {
            id: Set(id),
            company: Set(draft.company.trim().to_string()),
            position: Set(draft.position.trim().to_string()),
            period: Set(draft.period.trim().to_string()),
            description: Set(draft.description),
            technologies: Set(to_json(&draft.technologies)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&*self.db).await.map_err(map_write_err)?;

        model_to_experience(result)
    }

    async fn patch(
        &self,
        id: Uuid,
        patch: ExperiencePatch,
    ) -> Result<Experience, ContentRepositoryError> {
        let mut model = <ActiveModel as Default>::default();

        if let PatchField::Value(company) = patch.company {
            model.company = Set(company.trim().to_string());
        }
        if let PatchField::Value(position) = patch.position {
            model.position = Set(position.trim().to_string());
        }
        if let PatchField::Value(period) = patch.period {
            model.period = Set(period.trim().to_string());
        }
        if let PatchField::Value(description) = patch.description {
            model.description = Set(description);
        }
        if let PatchField::Value(technologies) = patch.technologies {
            model.technologies = Set(to_json(&technologies)?);
        }

        let has_changes = model.company.is_set()
            || model.position.is_set()
            || model.period.is_set()
            || model.description.is_set()
            || model.technologies.is_set();

        if !has_changes {
            return self.get_by_id(id).await;
        }

        model.updated_at = Set(Utc::now().fixed_offset());

        let result = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_write_err)?
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_experience(result)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError> {
        Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

fn model_to_experience(model: experiences::Model) -> Result<Experience, ContentRepositoryError> {
    Ok(Experience {
        id: model.id,
        company: model.company,
        position: model.position,
        period: model.period,
        description: model.description,
        technologies: from_json(&model.technologies)?,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}
