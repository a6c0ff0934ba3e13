mod experience;

pub use experience::{Experience, ExperiencePatch, NewExperience};
