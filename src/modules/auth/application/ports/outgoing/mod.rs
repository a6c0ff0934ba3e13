pub mod admin_query;
pub mod admin_repository;
pub mod login_attempt_store;
pub mod password_hasher;
pub mod token_provider;

pub use admin_query::{AdminCredentials, AdminQuery, AdminQueryError};
pub use admin_repository::{AdminRepository, AdminRepositoryError};
pub use login_attempt_store::{LoginAttemptStore, LoginAttemptStoreError, LoginAttempts};
pub use password_hasher::{HashError, PasswordHasher};
pub use token_provider::{TokenClaims, TokenError, TokenProvider};
