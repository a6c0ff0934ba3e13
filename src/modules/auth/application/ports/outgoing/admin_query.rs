use async_trait::async_trait;
use uuid::Uuid;

/// What login needs to know about an admin account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminCredentials {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminQueryError {
    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait AdminQuery: Send + Sync {
    /// `email` is expected already normalised (trimmed, lowercase).
    async fn find_by_email(&self, email: &str)
        -> Result<Option<AdminCredentials>, AdminQueryError>;
}
