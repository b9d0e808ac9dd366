use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Rejections of malformed or incomplete request input.
///
/// Every variant maps to 400 Bad Request and is raised before any write happens.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Field `{0}` is required")]
    MissingField(&'static str),
    #[error("Ingredient {0} is listed more than once")]
    DuplicateIngredient(i32),
    #[error("Amount for ingredient {ingredient_id} must be at least 1, got {amount}")]
    NonPositiveAmount { ingredient_id: i32, amount: i32 },
    #[error("Cooking time must be at least 1 minute, got {0}")]
    NonPositiveCookingTime(i32),
    #[error("Tag {0} does not exist")]
    UnknownTag(i32),
    #[error("Ingredient {0} does not exist")]
    UnknownIngredient(i32),
    #[error("Invalid image: {0}")]
    InvalidImage(String),
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
    #[error("Invalid query parameter: {0}")]
    InvalidQuery(String),
    #[error("A user with this email already exists")]
    EmailTaken,
    #[error("A user with this username already exists")]
    UsernameTaken,
    #[error("Current password is incorrect")]
    IncorrectPassword,
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("Validation error: {}", self);

        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
