pub mod api;
pub mod recipe;
pub mod user;
