// src/modules/content/domain/record.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A flat record owned by the database and exposed through the generic
/// create/read/update/delete accessors.
///
/// Each kind brings its own creation draft (no id, no timestamps), its own
/// patch shape, and its own list filter.
pub trait ContentRecord: Serialize + Clone + Send + Sync + 'static {
    type Draft: Clone + Send + Sync + 'static;
    type Patch: Clone + Default + Send + Sync + 'static;
    type Filter: Clone + Default + Send + Sync + 'static;

    /// Lowercase kind used in log labels and error codes (`"project"`).
    const KIND: &'static str;

    /// Human label used in error messages (`"Project"`).
    const LABEL: &'static str;

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Checked before any store call.
    fn validate_draft(_draft: &Self::Draft) -> Result<(), String> {
        Ok(())
    }

    /// Checked before any store call.
    fn validate_patch(_patch: &Self::Patch) -> Result<(), String> {
        Ok(())
    }
}
