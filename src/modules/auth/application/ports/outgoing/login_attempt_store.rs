use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Failed-login bookkeeping for one key (a normalised email address).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginAttempts {
    pub count: u32,
    pub last_attempt: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginAttemptStoreError {
    #[error("Attempt store unavailable: {0}")]
    Unavailable(String),

    #[error("Corrupt attempt entry: {0}")]
    Corrupt(String),
}

/// Storage behind the login rate limiter.
///
/// Process-local and shared implementations exist; the limiter only relies
/// on these three operations.
#[async_trait]
pub trait LoginAttemptStore: Send + Sync {
    async fn attempts(&self, key: &str) -> Result<Option<LoginAttempts>, LoginAttemptStoreError>;

    /// Increments the counter and stamps `now` as the latest attempt.
    async fn record_failure(
        &self,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginAttempts, LoginAttemptStoreError>;

    async fn reset(&self, key: &str) -> Result<(), LoginAttemptStoreError>;
}
