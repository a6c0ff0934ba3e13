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
use crate::modules::project::adapter::outgoing::sea_orm_entity::projects::{
    self, ActiveModel, Column, Entity,
};
use crate::modules::project::domain::{NewProject, Project, ProjectPatch};
use crate::shared::patch_field::PatchField;

// ============================================================================
// Repository Implementation
// ============================================================================

#[derive(Clone)]
pub struct ProjectRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl ProjectRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ContentRepository<Project> for ProjectRepositoryPostgres {
    async fn list(&self, _filter: ()) -> Result<Vec<Project>, ContentRepositoryError> {
        let models = Entity::find()
            .order_by_desc(Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(map_db_err)?;

        models.into_iter().map(model_to_project).collect()
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Project, ContentRepositoryError> {
        let model = Entity::find_by_id(id)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_project(model)
    }

    async fn create(
        &self,
        id: Uuid,
        draft: NewProject,
    ) -> Result<Project, ContentRepositoryError> {
        let now = Utc::now().fixed_offset();

        let model = ActiveModel {
            id: Set(id),
            title: Set(draft.title),
            description: Set(draft.description),
            image_url: Set(draft.image_url),
            github_url: Set(draft.github_url),
            tags: Set(to_json(&draft.tags)?),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let result = model.insert(&*self.db).await.map_err(map_write_err)?;

        model_to_project(result)
    }

    async fn patch(&self, id: Uuid, patch: ProjectPatch) -> Result<Project, ContentRepositoryError> {
        let mut model = <ActiveModel as Default>::default();

        if let PatchField::Value(title) = patch.title {
            model.title = Set(title.trim().to_string());
        }

        if let PatchField::Value(description) = patch.description {
            model.description = Set(description);
        }

        match patch.image_url {
            PatchField::Unset => {}
            PatchField::Null => model.image_url = Set(None),
            PatchField::Value(url) => model.image_url = Set(Some(url)),
        }

        match patch.github_url {
            PatchField::Unset => {}
            PatchField::Null => model.github_url = Set(None),
            PatchField::Value(url) => model.github_url = Set(Some(url)),
        }

        if let PatchField::Value(tags) = patch.tags {
            model.tags = Set(to_json(&tags)?);
        }

        let has_changes = model.title.is_set()
            || model.description.is_set()
            || model.image_url.is_set()
            || model.github_url.is_set()
            || model.tags.is_set();

        if !has_changes {
            return self.get_by_id(id).await;
        }

        model.updated_at = Set(Utc::now().fixed_offset());

        let results = Entity::update_many()
            .set(model)
            .filter(Column::Id.eq(id))
            .exec_with_returning(&*self.db)
            .await
            .map_err(map_write_err)?;

        let result = results
            .into_iter()
            .next()
            .ok_or(ContentRepositoryError::NotFound)?;

        model_to_project(result)
    }

    async fn delete(&self, id: Uuid) -> Result<(), ContentRepositoryError> {
        Entity::delete_by_id(id)
            .exec(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(())
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

fn model_to_project(model: projects::Model) -> Result<Project, ContentRepositoryError> {
    Ok(Project {
        id: model.id,
        title: model.title,
        description: model.description,
        image_url: model.image_url,
        github_url: model.github_url,
        tags: from_json(&model.tags)?,
        created_at: model.created_at.into(),
        updated_at: model.updated_at.into(),
    })
}

// ============================================================================
// Tests
// ============================================================================
