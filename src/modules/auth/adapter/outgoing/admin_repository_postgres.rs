use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::Arc;
use uuid::Uuid;

use super::sea_orm_entity::admin_users::ActiveModel;
use crate::modules::auth::application::ports::outgoing::{AdminRepository, AdminRepositoryError};
use crate::modules::content::adapter::outgoing::map_write_err;
use crate::modules::content::application::ports::outgoing::ContentRepositoryError;

#[derive(Clone, Debug)]
pub struct AdminRepositoryPostgres {
    db: Arc<DatabaseConnection>,
}

impl AdminRepositoryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdminRepository for AdminRepositoryPostgres {
    async fn create_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Uuid, AdminRepositoryError> {
        let now = Utc::now().fixed_offset();

        let model = ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email.to_string()),
            password_hash: Set(password_hash.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let inserted = model.insert(&*self.db).await.map_err(|e| match map_write_err(e) {
            ContentRepositoryError::Conflict(_) => {
                AdminRepositoryError::AlreadyExists(email.to_string())
            }
            other => AdminRepositoryError::DatabaseError(other.to_string()),
        })?;

        Ok(inserted.id)
    }
}
