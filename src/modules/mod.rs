pub mod article;
pub mod auth;
pub mod content;
pub mod dashboard;
pub mod education;
pub mod experience;
pub mod project;
