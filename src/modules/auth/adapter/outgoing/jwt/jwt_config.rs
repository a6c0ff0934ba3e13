use crate::config::{parsed_or, required, ConfigError};

const MIN_SECRET_LEN: usize = 32;
const MAX_ACCESS_EXPIRY: i64 = 86_400;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub issuer: String,
    pub access_token_expiry: i64, // Expiration in seconds
}

impl JwtConfig {
    /// Reads `JWT_SECRET`, `JWT_ISSUER` and `JWT_ACCESS_EXPIRY` through
    /// `lookup`.
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = required(lookup, "JWT_SECRET")?;

        // HS256 wants at least 32 bytes of key material
        if secret_key.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Invalid {
                key: "JWT_SECRET",
                reason: format!("must be at least {MIN_SECRET_LEN} characters"),
            });
        }

        let access_token_expiry: i64 = parsed_or(lookup, "JWT_ACCESS_EXPIRY", 1800)?;
        if access_token_expiry <= 0 || access_token_expiry > MAX_ACCESS_EXPIRY {
            return Err(ConfigError::Invalid {
                key: "JWT_ACCESS_EXPIRY",
                reason: format!("must be between 1 and {MAX_ACCESS_EXPIRY} seconds"),
            });
        }

        let issuer = lookup("JWT_ISSUER").unwrap_or_else(|| "portfolio-backend".to_string());

        Ok(Self {
            secret_key,
            issuer,
            access_token_expiry,
        })
    }
}
