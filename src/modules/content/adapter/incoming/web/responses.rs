use actix_web::HttpResponse;
use tracing::error;

use crate::modules::content::application::ports::incoming::AccessorError;
use crate::modules::content::domain::ContentRecord;
use crate::shared::api::ApiResponse;

/// Maps an accessor failure onto the API envelope.
///
/// Codes are derived from the record kind: `PROJECT_NOT_FOUND`,
/// `EXPERIENCE_CONFLICT`, ... Store failures are logged and surface as a
/// generic 500.
pub fn accessor_error_response<E: ContentRecord>(err: AccessorError) -> HttpResponse {
    let kind = E::KIND.to_uppercase();

    match err {
        AccessorError::NotFound => ApiResponse::not_found(
            &format!("{kind}_NOT_FOUND"),
            &format!("{} not found", E::LABEL),
        ),

        AccessorError::Validation(msg) => ApiResponse::bad_request("VALIDATION_ERROR", &msg),

        AccessorError::Conflict(msg) => {
            ApiResponse::conflict(&format!("{kind}_CONFLICT"), &msg)
        }

        AccessorError::StoreFailure(msg) => {
            error!(kind = E::KIND, error = %msg, "Content store failure");
            ApiResponse::internal_error()
        }
    }
}
