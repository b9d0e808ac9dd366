//! Service layer for business logic and orchestration.
//!
//! Services validate input, coordinate repositories and own transaction boundaries. The
//! relation toggle engine, the shopping list aggregation and the recipe composition validator
//! live here alongside the account, reference data and recipe services.

pub mod auth;
pub mod composition;
pub mod import;
pub mod ingredient;
pub mod recipe;
pub mod relation;
pub mod shopping_cart;
pub mod subscription;
pub mod tag;
pub mod user;
