use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use crate::modules::auth::application::ports::outgoing::{
    LoginAttemptStore, LoginAttemptStoreError,
};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;
pub const DEFAULT_LOCKOUT_SECS: i64 = 15 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitStatus {
    Allowed,
    Limited { retry_after_secs: i64 },
}

/// Per-email failed-login limiter.
///
/// An email is locked once it has `max_attempts` failures whose latest one
/// is no older than `lockout`. Every failure restarts the window. Entries
/// older than the window are dropped on the next check.
#[derive(Clone)]
pub struct LoginRateLimiter {
    store: Arc<dyn LoginAttemptStore>,
    max_attempts: u32,
    lockout: Duration,
}

impl LoginRateLimiter {
    pub fn new(store: Arc<dyn LoginAttemptStore>, max_attempts: u32, lockout: Duration) -> Self {
        Self {
            store,
            max_attempts,
            lockout,
        }
    }

    pub fn with_defaults(store: Arc<dyn LoginAttemptStore>) -> Self {
        Self::new(
            store,
            DEFAULT_MAX_ATTEMPTS,
            Duration::seconds(DEFAULT_LOCKOUT_SECS),
        )
    }

    pub fn lockout(&self) -> Duration {
        self.lockout
    }

    pub async fn check(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<RateLimitStatus, LoginAttemptStoreError> {
        let Some(attempts) = self.store.attempts(email).await? else {
            return Ok(RateLimitStatus::Allowed);
        };

        let elapsed = now - attempts.last_attempt;
        if elapsed > self.lockout {
            self.store.reset(email).await?;
            return Ok(RateLimitStatus::Allowed);
        }

        if attempts.count >= self.max_attempts {
            let retry_after_secs = (self.lockout - elapsed).num_seconds().max(1);
            return Ok(RateLimitStatus::Limited { retry_after_secs });
        }

        Ok(RateLimitStatus::Allowed)
    }

    pub async fn is_limited(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, LoginAttemptStoreError> {
        Ok(matches!(
            self.check(email, now).await?,
            RateLimitStatus::Limited { .. }
        ))
    }

    pub async fn record_failure(
        &self,
        email: &str,
        now: DateTime<Utc>,
    ) -> Result<u32, LoginAttemptStoreError> {
        Ok(self.store.record_failure(email, now).await?.count)
    }

    pub async fn reset(&self, email: &str) -> Result<(), LoginAttemptStoreError> {
        self.store.reset(email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auth::adapter::outgoing::InMemoryLoginAttemptStore;

    fn limiter() -> LoginRateLimiter {
        LoginRateLimiter::with_defaults(Arc::new(InMemoryLoginAttemptStore::new()))
    }

    #[tokio::test]
    async fn unknown_email_is_not_limited() {
        let limiter = limiter();

        assert!(!limiter.is_limited("a@b.co", Utc::now()).await.unwrap());
    }

    #[tokio::test]
    async fn locks_after_five_failures() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..4 {
            limiter.record_failure("a@b.co", now).await.unwrap();
        }
        assert!(!limiter.is_limited("a@b.co", now).await.unwrap());

        limiter.record_failure("a@b.co", now).await.unwrap();
        assert!(limiter.is_limited("a@b.co", now).await.unwrap());
    }

    #[tokio::test]
    async fn lock_is_per_email() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..5 {
            limiter.record_failure("a@b.co", now).await.unwrap();
        }

        assert!(!limiter.is_limited("other@b.co", now).await.unwrap());
    }

    #[tokio::test]
    async fn lock_lifts_after_window_and_counter_restarts() {
        let limiter = limiter();
        let start = Utc::now();

        for _ in 0..5 {
            limiter.record_failure("a@b.co", start).await.unwrap();
        }

        let still_inside = start + Duration::seconds(DEFAULT_LOCKOUT_SECS);
        assert!(limiter.is_limited("a@b.co", still_inside).await.unwrap());

        let after = start + Duration::seconds(DEFAULT_LOCKOUT_SECS + 1);
        assert!(!limiter.is_limited("a@b.co", after).await.unwrap());

        // entry was dropped, so one new failure starts from 1
        assert_eq!(limiter.record_failure("a@b.co", after).await.unwrap(), 1);
        assert!(!limiter.is_limited("a@b.co", after).await.unwrap());
    }

    #[tokio::test]
    async fn retry_after_counts_down_from_last_failure() {
        let limiter = limiter();
        let start = Utc::now();

        for _ in 0..5 {
            limiter.record_failure("a@b.co", start).await.unwrap();
        }

        let status = limiter
            .check("a@b.co", start + Duration::seconds(60))
            .await
            .unwrap();

        assert_eq!(
            status,
            RateLimitStatus::Limited {
                retry_after_secs: DEFAULT_LOCKOUT_SECS - 60
            }
        );
    }

    #[tokio::test]
    async fn reset_clears_failures() {
        let limiter = limiter();
        let now = Utc::now();

        for _ in 0..5 {
            limiter.record_failure("a@b.co", now).await.unwrap();
        }
        limiter.reset("a@b.co").await.unwrap();

        assert!(!limiter.is_limited("a@b.co", now).await.unwrap());
    }
}
