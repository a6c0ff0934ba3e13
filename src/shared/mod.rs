pub mod api;
pub mod patch_field;
pub mod retry;
pub mod slug;
pub mod tags;
