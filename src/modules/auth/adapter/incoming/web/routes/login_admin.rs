use actix_web::{post, web, Responder};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::modules::auth::application::use_cases::login_admin::{LoginError, LoginRequest};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Login request from client
#[derive(Deserialize, Serialize, ToSchema)]
pub struct LoginRequestDto {
    /// Email address
    #[schema(example = "owner@example.com")]
    pub email: String,

    /// Password
    #[schema(example = "SecurePass123!")]
    pub password: String,
}

#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    access_token: String,

    #[schema(example = "Bearer")]
    token_type: String,

    /// Seconds until the token expires
    #[schema(example = 1800)]
    expires_in: i64,

    admin: LoginAdminInfo,
}

#[derive(Serialize, ToSchema)]
pub struct LoginAdminInfo {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    id: String,

    #[schema(example = "owner@example.com")]
    email: String,
}

/// Admin login
///
/// Exchanges email and password for a JWT access token. After 5 failed
/// attempts for the same email further attempts are refused for 15 minutes.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "auth",
    request_body = LoginRequestDto,
    responses(
        (status = 200, description = "Login successful", body = inline(SuccessResponse<LoginResponse>)),
        (status = 400, description = "Malformed email or empty password", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse,
            example = json!({
                "success": false,
                "error": {
                    "code": "INVALID_CREDENTIALS",
                    "message": "Invalid email or password"
                }
            })
        ),
        (status = 429, description = "Too many failed attempts; see Retry-After", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[post("/api/auth/login")]
pub async fn login_admin_handler(
    req: web::Json<LoginRequestDto>,
    data: web::Data<AppState>,
) -> impl Responder {
    let dto = req.into_inner();

    let request = match LoginRequest::new(dto.email, dto.password) {
        Ok(req) => req,
        Err(e) => return ApiResponse::bad_request("VALIDATION_ERROR", &e.to_string()),
    };

    info!(email = %request.email(), "Login attempt");

    match data.login_admin.execute(request).await {
        Ok(response) => ApiResponse::success(LoginResponse {
            access_token: response.access_token,
            token_type: response.token_type.to_string(),
            expires_in: response.expires_in,
            admin: LoginAdminInfo {
                id: response.admin.id.to_string(),
                email: response.admin.email,
            },
        }),

        Err(LoginError::InvalidCredentials) => {
            ApiResponse::unauthorized("INVALID_CREDENTIALS", "Invalid email or password")
        }

        Err(LoginError::TooManyAttempts { retry_after_secs }) => {
            warn!(retry_after_secs, "Login refused: too many attempts");
            ApiResponse::too_many_requests(
                "TOO_MANY_ATTEMPTS",
                "Too many login attempts. Please try again later.",
                retry_after_secs,
            )
        }

        Err(LoginError::StoreFailure(ref e)) => {
            error!(error = %e, "Admin lookup failed");
            ApiResponse::internal_error()
        }

        Err(LoginError::Internal(ref e)) => {
            error!(error = %e, "Login failed unexpectedly");
            ApiResponse::internal_error()
        }
    }
}
