//! Server application models and type definitions.
//!
//! Application state, database model aliases, session data, pagination and the canonical
//! recipe composite from which the API representations are built.

pub mod app;
pub mod db;
pub mod pagination;
pub mod recipe;
pub mod relation;
pub mod session;
pub mod shopping_list;
pub mod user;
