use std::str::FromStr;

use crate::modules::auth::adapter::outgoing::jwt::JwtConfig;
use crate::modules::auth::application::services::{DEFAULT_LOCKOUT_SECS, DEFAULT_MAX_ATTEMPTS};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("{key} is invalid: {reason}")]
    Invalid { key: &'static str, reason: String },
}

pub(crate) fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

/// Unset means `default`; set but unparsable is an error.
pub(crate) fn parsed_or<T, F>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
    }
}

#[derive(Debug, Clone)]
pub struct BootstrapAdminConfig {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// In-memory login-attempt store when absent.
    pub redis_url: Option<String>,
    pub jwt: JwtConfig,
    pub login_max_attempts: u32,
    pub login_lockout_secs: i64,
    pub bootstrap_admin: Option<BootstrapAdminConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parsed_or(lookup, "PORT", 8080u16)?;
        let database_url = required(lookup, "DATABASE_URL")?;

        let db_max_connections = parsed_or(lookup, "DB_MAX_CONNECTIONS", 20u32)?;
        if db_max_connections == 0 {
            return Err(ConfigError::Invalid {
                key: "DB_MAX_CONNECTIONS",
                reason: "must be at least 1".to_string(),
            });
        }

        let redis_url = lookup("REDIS_URL").filter(|v| !v.trim().is_empty());
        let jwt = JwtConfig::from_lookup(lookup)?;

        let login_max_attempts = parsed_or(lookup, "LOGIN_MAX_ATTEMPTS", DEFAULT_MAX_ATTEMPTS)?;
        if login_max_attempts == 0 {
            return Err(ConfigError::Invalid {
                key: "LOGIN_MAX_ATTEMPTS",
                reason: "must be at least 1".to_string(),
            });
        }
        let lockout_secs = parsed_or(lookup, "LOGIN_LOCKOUT_SECS", DEFAULT_LOCKOUT_SECS)?;
        if lockout_secs <= 0 {
            return Err(ConfigError::Invalid {
                key: "LOGIN_LOCKOUT_SECS",
                reason: "must be at least 1".to_string(),
            });
        }

        let bootstrap_admin = match (lookup("ADMIN_EMAIL"), lookup("ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdminConfig { email, password }),
            (None, None) => None,
            (Some(_), None) => return Err(ConfigError::Missing("ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::Missing("ADMIN_EMAIL")),
        };

        Ok(Self {
            host,
            port,
            database_url,
            db_max_connections,
            redis_url,
            jwt,
            login_max_attempts,
            login_lockout_secs: lockout_secs,
            bootstrap_admin,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
