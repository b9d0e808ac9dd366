//! HTTP controller endpoints for the Foodgram web API.
//!
//! Axum handlers for authentication, users and subscriptions, reference data and recipes.
//! Controllers resolve the session user, hand the request to a service and turn the result
//! into a response. Every handler carries a `utoipa` path definition used to build the
//! OpenAPI document.

pub mod auth;
pub mod ingredient;
pub mod recipe;
pub mod tag;
pub mod user;
pub mod util;
