use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminRepositoryError {
    #[error("Admin already exists: {0}")]
    AlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create_admin(
        &self,
        email: &str,
        password_hash: &str,
    ) -> Result<Uuid, AdminRepositoryError>;
}
