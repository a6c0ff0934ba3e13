mod content_accessor_service;

pub use content_accessor_service::ContentAccessorService;
