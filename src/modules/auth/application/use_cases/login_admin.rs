use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use email_address::EmailAddress;
use serde::Serialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::modules::auth::application::ports::outgoing::{
    AdminQuery, PasswordHasher, TokenProvider,
};
use crate::modules::auth::application::services::{LoginRateLimiter, RateLimitStatus};

const MAX_EMAIL_LEN: usize = 255;

// ========================= Login Request =========================

/// Validated login input. Construction is the only validation step, so a
/// `LoginRequest` in hand always carries a normalised email.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email is too long")]
    EmailTooLong,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }
        if email.len() > MAX_EMAIL_LEN {
            return Err(LoginRequestError::EmailTooLong);
        }
        if !EmailAddress::is_valid(email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }
        if password.trim().is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ====================== Login Error =============================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("Too many login attempts, retry in {retry_after_secs}s")]
    TooManyAttempts { retry_after_secs: i64 },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Admin lookup failed: {0}")]
    StoreFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

// ============================ Login Response =================================

#[derive(Debug, Clone, Serialize)]
pub struct AdminInfo {
    pub id: Uuid,
    pub email: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginAdminResponse {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub admin: AdminInfo,
}

// ============================ Use Case =============================

#[async_trait]
pub trait LoginAdminUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginAdminResponse, LoginError>;
}

pub struct LoginAdminService<Q>
where
    Q: AdminQuery,
{
    query: Q,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenProvider>,
    limiter: LoginRateLimiter,
}

impl<Q> LoginAdminService<Q>
where
    Q: AdminQuery,
{
    pub fn new(
        query: Q,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenProvider>,
        limiter: LoginRateLimiter,
    ) -> Self {
        Self {
            query,
            hasher,
            tokens,
            limiter,
        }
    }

    async fn credential_failure(&self, email: &str) -> LoginError {
        match self.limiter.record_failure(email, Utc::now()).await {
            Ok(count) => info!(email, attempts = count, "Failed admin login"),
            Err(e) => warn!(email, error = %e, "Could not record failed login attempt"),
        }
        LoginError::InvalidCredentials
    }
}

#[async_trait]
impl<Q> LoginAdminUseCase for LoginAdminService<Q>
where
    Q: AdminQuery,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginAdminResponse, LoginError> {
        let email = request.email();

        // A broken attempt store must not lock the admin out.
        match self.limiter.check(email, Utc::now()).await {
            Ok(RateLimitStatus::Limited { retry_after_secs }) => {
                warn!(email, retry_after_secs, "Admin login rate limited");
                return Err(LoginError::TooManyAttempts { retry_after_secs });
            }
            Ok(RateLimitStatus::Allowed) => {}
            Err(e) => warn!(email, error = %e, "Rate limit check failed, allowing attempt"),
        }

        let admin = match self.query.find_by_email(email).await {
            Ok(Some(admin)) => admin,
            Ok(None) => return Err(self.credential_failure(email).await),
            Err(e) => return Err(LoginError::StoreFailure(e.to_string())),
        };

        let password_ok = self
            .hasher
            .verify_password(request.password(), &admin.password_hash)
            .await
            .map_err(|e| {
                error!(admin_id = %admin.id, error = %e, "Stored password hash is unusable");
                LoginError::Internal(e.to_string())
            })?;

        if !password_ok {
            return Err(self.credential_failure(email).await);
        }

        if let Err(e) = self.limiter.reset(email).await {
            warn!(email, error = %e, "Could not reset login attempts");
        }

        let access_token = self
            .tokens
            .generate_access_token(admin.id, &admin.email)
            .map_err(|e| LoginError::Internal(e.to_string()))?;

        info!(admin_id = %admin.id, "Admin logged in");

        Ok(LoginAdminResponse {
            access_token,
            token_type: "Bearer",
            expires_in: self.tokens.access_token_ttl(),
            admin: AdminInfo {
                id: admin.id,
                email: admin.email,
            },
        })
    }
}
