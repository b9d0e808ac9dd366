use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResourceError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i32 },
    #[error("Page {0} does not exist")]
    PageNotFound(u64),
    #[error("You do not have permission to {0}")]
    Forbidden(&'static str),
}

impl ResourceError {
    pub fn recipe_not_found(id: i32) -> Self {
        Self::NotFound {
            resource: "Recipe",
            id,
        }
    }

    pub fn user_not_found(id: i32) -> Self {
        Self::NotFound { resource: "User", id }
    }
}

impl IntoResponse for ResourceError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound { .. } | Self::PageNotFound(_) => StatusCode::NOT_FOUND,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
        };

        tracing::debug!("{}", self);

        error_response(status, self.to_string())
    }
}
