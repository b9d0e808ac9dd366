//! Error types for the Foodgram server.
//!
//! Each domain has its own error enum with an `IntoResponse` implementation mapping it to an
//! HTTP status and an [`ErrorDto`] body. The top-level [`Error`] aggregates them so services
//! and controllers can use `?` throughout.

pub mod auth;
pub mod cart;
pub mod config;
pub mod relation;
pub mod resource;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, cart::CartError, config::ConfigError, relation::RelationError,
        resource::ResourceError, validation::ValidationError,
    },
};

/// Main error type for the Foodgram server.
///
/// Domain errors are surfaced to the client with their message, every other variant is
/// treated as an internal server error and only logged.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (missing session, unknown user, bad credentials).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Request payload or query failed validation.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// Favorite, shopping cart or subscription toggle rejected.
    #[error(transparent)]
    RelationError(#[from] RelationError),
    /// Requested resource is missing or not owned by the requesting user.
    #[error(transparent)]
    ResourceError(#[from] ResourceError),
    /// Shopping cart download rejected.
    #[error(transparent)]
    CartError(#[from] CartError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Internal error indicating a bug in Foodgram's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] fred::prelude::Error),
    /// IO error (binding the listener, reading import files).
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - Validation failures, rejected toggles, empty shopping cart
/// - 401 Unauthorized - No user in session
/// - 403 Forbidden - Modifying another author's recipe
/// - 404 Not Found - Missing recipes, users, tags, ingredients or pages
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::RelationError(err) => err.into_response(),
            Self::ResourceError(err) => err.into_response(),
            Self::CartError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds a JSON error response with the provided status and message.
pub(crate) fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorDto { error: message })).into_response()
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The full error is logged, the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    }
}
