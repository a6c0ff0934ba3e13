mod content_accessor;

pub use content_accessor::{AccessorError, ContentAccessor};
