mod get_dashboard;

pub use get_dashboard::{__path_get_dashboard_handler, get_dashboard_handler};
