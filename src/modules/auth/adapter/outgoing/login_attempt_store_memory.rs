use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::modules::auth::application::ports::outgoing::{
    LoginAttemptStore, LoginAttemptStoreError, LoginAttempts,
};
use crate::modules::auth::application::services::DEFAULT_LOCKOUT_SECS;

/// Process-local attempt counters. Every instance of the server keeps its
/// own map, and entries vanish on restart.
///
/// Entries whose last failure is older than `ttl` are dropped on the next
/// write, so the map only holds keys still inside the lockout window.
#[derive(Debug)]
pub struct InMemoryLoginAttemptStore {
    entries: Mutex<HashMap<String, LoginAttempts>>,
    ttl: Duration,
}

impl InMemoryLoginAttemptStore {
    pub fn new() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_LOCKOUT_SECS))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }
}

impl Default for InMemoryLoginAttemptStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoginAttemptStore for InMemoryLoginAttemptStore {
    async fn attempts(&self, key: &str) -> Result<Option<LoginAttempts>, LoginAttemptStoreError> {
        Ok(self.entries.lock().await.get(key).copied())
    }

    async fn record_failure(
        &self,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginAttempts, LoginAttemptStoreError> {
        let mut entries = self.entries.lock().await;
        entries.retain(|_, a| now - a.last_attempt <= self.ttl);

        let entry = entries
            .entry(key.to_string())
            .and_modify(|a| {
                a.count += 1;
                a.last_attempt = now;
            })
            .or_insert(LoginAttempts {
                count: 1,
                last_attempt: now,
            });

        Ok(*entry)
    }

    async fn reset(&self, key: &str) -> Result<(), LoginAttemptStoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
