use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::{error::error_response, model::relation::RelationKind};

/// Rejected relation toggles.
///
/// None of these change state, they are all reported as 400 Bad Request.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RelationError {
    #[error("{}", .0.already_exists_message())]
    AlreadyExists(RelationKind),
    #[error("{}", .0.not_found_message())]
    NotFound(RelationKind),
    #[error("{0}")]
    InvalidOperation(&'static str),
}

impl IntoResponse for RelationError {
    fn into_response(self) -> Response {
        tracing::debug!("Relation toggle rejected: {}", self);

        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
