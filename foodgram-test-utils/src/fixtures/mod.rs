//! Test fixtures for inserting database records during test execution.
//!
//! - `user` - Users and author subscriptions
//! - `recipe` - Tags, ingredients, recipes and their favorite/shopping cart relations
//! - `factory` - Request payloads for controller tests

pub mod factory;
pub mod recipe;
pub mod user;
