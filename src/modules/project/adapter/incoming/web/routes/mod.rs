mod admin;
mod public;

pub use admin::{
    create_project_handler, delete_project_handler, patch_project_handler, CreateProjectRequest,
    PatchProjectRequest,
};
pub use public::{get_project_handler, get_projects_handler};
