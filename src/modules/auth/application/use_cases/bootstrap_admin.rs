use std::sync::Arc;

use tracing::info;

use crate::modules::auth::application::ports::outgoing::{
    AdminQuery, AdminRepository, AdminRepositoryError, PasswordHasher,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BootstrapAdminError {
    #[error("Invalid bootstrap email: {0}")]
    InvalidEmail(String),

    #[error("Bootstrap password must not be empty")]
    EmptyPassword,

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Store failure: {0}")]
    Store(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    Created,
    AlreadyPresent,
}

/// Creates the admin account from start-up configuration when it does not
/// exist yet. An existing account is never touched, so its password can be
/// rotated in the database without the environment overriding it.
pub struct BootstrapAdmin<Q, R>
where
    Q: AdminQuery,
    R: AdminRepository,
{
    query: Q,
    repository: R,
    hasher: Arc<dyn PasswordHasher>,
}

impl<Q, R> BootstrapAdmin<Q, R>
where
    Q: AdminQuery,
    R: AdminRepository,
{
    pub fn new(query: Q, repository: R, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            query,
            repository,
            hasher,
        }
    }

    pub async fn ensure(
        &self,
        email: &str,
        password: &str,
    ) -> Result<BootstrapOutcome, BootstrapAdminError> {
        let email = email.trim().to_lowercase();
        if !email_address::EmailAddress::is_valid(&email) {
            return Err(BootstrapAdminError::InvalidEmail(email));
        }
        if password.is_empty() {
            return Err(BootstrapAdminError::EmptyPassword);
        }

        let existing = self
            .query
            .find_by_email(&email)
            .await
            .map_err(|e| BootstrapAdminError::Store(e.to_string()))?;
        if existing.is_some() {
            return Ok(BootstrapOutcome::AlreadyPresent);
        }

        let hash = self
            .hasher
            .hash_password(password)
            .await
            .map_err(|e| BootstrapAdminError::Hash(e.to_string()))?;

        match self.repository.create_admin(&email, &hash).await {
            Ok(id) => {
                info!(admin_id = %id, "Bootstrap admin created");
                Ok(BootstrapOutcome::Created)
            }
            // another instance won the race
            Err(AdminRepositoryError::AlreadyExists(_)) => Ok(BootstrapOutcome::AlreadyPresent),
            Err(e) => Err(BootstrapAdminError::Store(e.to_string())),
        }
    }
}
