mod education;

pub use education::{Education, EducationPatch, NewEducation};
