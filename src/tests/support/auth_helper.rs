use std::str::FromStr;
use std::sync::Arc;

use actix_web::web;
use uuid::Uuid;

use crate::modules::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
use crate::modules::auth::application::ports::outgoing::TokenProvider;

pub const TEST_ADMIN_ID: &str = "6f2d7c1e-3b4a-4e5f-9a8b-1c2d3e4f5a6b";
pub const TEST_ADMIN_EMAIL: &str = "admin@example.com";

pub fn test_jwt_service() -> JwtTokenService {
    JwtTokenService::new(JwtConfig {
        secret_key: "test_secret_key_for_testing_only_0123456789".to_string(),
        issuer: "portfolio-backend-test".to_string(),
        access_token_expiry: 3600,
    })
}

/// The token provider as the admin extractor looks it up.
pub fn token_provider_data() -> web::Data<Arc<dyn TokenProvider + Send + Sync>> {
    let provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(test_jwt_service());
    web::Data::new(provider)
}

/// `Authorization` header carrying a fresh access token for the test admin.
pub fn bearer() -> (&'static str, String) {
    let admin_id = Uuid::from_str(TEST_ADMIN_ID).unwrap();
    let token = test_jwt_service()
        .generate_access_token(admin_id, TEST_ADMIN_EMAIL)
        .unwrap();

    ("Authorization", format!("Bearer {token}"))
}
