mod db_errors;

pub use db_errors::{from_json, map_db_err, map_write_err, to_json};
