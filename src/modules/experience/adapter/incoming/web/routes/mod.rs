mod experience_routes;

pub use experience_routes::{
    create_experience_handler, delete_experience_handler, get_experience_handler,
    get_experiences_handler, patch_experience_handler, CreateExperienceRequest,
    PatchExperienceRequest,
};
