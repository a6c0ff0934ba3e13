use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use std::sync::Arc;

use super::sea_orm_entity::admin_users::{Column, Entity, Model};
use crate::modules::auth::application::ports::outgoing::{
    AdminCredentials, AdminQuery, AdminQueryError,
};

#[derive(Clone, Debug)]
pub struct AdminQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AdminQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl From<Model> for AdminCredentials {
    fn from(model: Model) -> Self {
        AdminCredentials {
            id: model.id,
            email: model.email,
            password_hash: model.password_hash,
        }
    }
}

#[async_trait]
impl AdminQuery for AdminQueryPostgres {
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminCredentials>, AdminQueryError> {
        let admin = Entity::find()
            .filter(Column::Email.eq(email))
            .one(&*self.db)
            .await
            .map_err(|e| AdminQueryError::DatabaseError(e.to_string()))?;

        Ok(admin.map(AdminCredentials::from))
    }
}
