use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::collections::HashMap;
use std::sync::Arc;

use crate::modules::auth::application::ports::outgoing::{
    LoginAttemptStore, LoginAttemptStoreError, LoginAttempts,
};

const COUNT: &str = "count";
const LAST_ATTEMPT: &str = "last_attempt";

/// Redis-backed attempt counters, shared by every server instance.
///
/// ```text
/// auth:login_attempts:{email} -> HASH { count, last_attempt (unix secs) }
/// ```
///
/// Each failure refreshes the key TTL to the lockout window, so stale
/// entries expire without cleanup.
#[derive(Clone)]
pub struct RedisLoginAttemptStore {
    pool: Arc<Pool>,
    ttl_secs: i64,
}

impl RedisLoginAttemptStore {
    pub fn new(pool: Arc<Pool>, ttl_secs: i64) -> Self {
        Self { pool, ttl_secs }
    }

    fn key(email: &str) -> String {
        format!("auth:login_attempts:{email}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, LoginAttemptStoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| LoginAttemptStoreError::Unavailable(format!("Pool error: {e}")))
    }
}

fn unavailable(e: deadpool_redis::redis::RedisError) -> LoginAttemptStoreError {
    LoginAttemptStoreError::Unavailable(e.to_string())
}

/// An empty hash means "no entry".
fn parse_entry(
    fields: &HashMap<String, String>,
) -> Result<Option<LoginAttempts>, LoginAttemptStoreError> {
    if fields.is_empty() {
        return Ok(None);
    }

    let field = |name: &str| {
        fields
            .get(name)
            .ok_or_else(|| LoginAttemptStoreError::Corrupt(format!("missing field '{name}'")))
    };

    let count = field(COUNT)?
        .parse::<u32>()
        .map_err(|e| LoginAttemptStoreError::Corrupt(format!("count: {e}")))?;

    let secs = field(LAST_ATTEMPT)?
        .parse::<i64>()
        .map_err(|e| LoginAttemptStoreError::Corrupt(format!("last_attempt: {e}")))?;

    let last_attempt = Utc
        .timestamp_opt(secs, 0)
        .single()
        .ok_or_else(|| LoginAttemptStoreError::Corrupt(format!("last_attempt out of range: {secs}")))?;

    Ok(Some(LoginAttempts {
        count,
        last_attempt,
    }))
}

#[async_trait]
impl LoginAttemptStore for RedisLoginAttemptStore {
    async fn attempts(&self, key: &str) -> Result<Option<LoginAttempts>, LoginAttemptStoreError> {
        let mut conn = self.get_conn().await?;

        let fields: HashMap<String, String> =
            conn.hgetall(Self::key(key)).await.map_err(unavailable)?;

        parse_entry(&fields)
    }

    async fn record_failure(
        &self,
        key: &str,
        now: DateTime<Utc>,
    ) -> Result<LoginAttempts, LoginAttemptStoreError> {
        let redis_key = Self::key(key);
        let mut conn = self.get_conn().await?;

        let (count,): (u32,) = deadpool_redis::redis::pipe()
            .atomic()
            .hincr(&redis_key, COUNT, 1)
            .hset(&redis_key, LAST_ATTEMPT, now.timestamp())
            .ignore()
            .expire(&redis_key, self.ttl_secs)
            .ignore()
            .query_async(&mut *conn)
            .await
            .map_err(unavailable)?;

        Ok(LoginAttempts {
            count,
            last_attempt: now,
        })
    }

    async fn reset(&self, key: &str) -> Result<(), LoginAttemptStoreError> {
        let mut conn = self.get_conn().await?;

        conn.del::<_, ()>(Self::key(key))
            .await
            .map_err(unavailable)?;

        Ok(())
    }
}
