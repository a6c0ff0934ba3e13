mod record;

pub use record::ContentRecord;
