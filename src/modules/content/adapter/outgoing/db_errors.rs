use sea_orm::DbErr;

use crate::modules::content::application::ports::outgoing::ContentRepositoryError;

pub fn map_db_err(e: DbErr) -> ContentRepositoryError {
    ContentRepositoryError::DatabaseError(e.to_string())
}

/// Inserts/updates: unique violations become `Conflict`, the rest
/// `DatabaseError`.
pub fn map_write_err(e: DbErr) -> ContentRepositoryError {
    let msg = e.to_string().to_lowercase();

    if msg.contains("duplicate") || msg.contains("unique") || msg.contains("23505") {
        ContentRepositoryError::Conflict(e.to_string())
    } else {
        ContentRepositoryError::DatabaseError(e.to_string())
    }
}

pub fn to_json<T: serde::Serialize>(data: &T) -> Result<serde_json::Value, ContentRepositoryError> {
    serde_json::to_value(data)
        .map_err(|e| ContentRepositoryError::SerializationError(e.to_string()))
}

pub fn from_json<T: serde::de::DeserializeOwned>(
    json: &serde_json::Value,
) -> Result<T, ContentRepositoryError> {
    serde_json::from_value(json.clone())
        .map_err(|e| ContentRepositoryError::SerializationError(e.to_string()))
}
