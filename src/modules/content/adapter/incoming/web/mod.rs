mod responses;

pub use responses::accessor_error_response;
