mod education_routes;

pub use education_routes::{
    create_education_handler, delete_education_handler, get_education_entry_handler,
    get_education_handler, patch_education_handler, CreateEducationRequest,
    PatchEducationRequest,
};
