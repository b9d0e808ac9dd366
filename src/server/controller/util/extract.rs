use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts, Path, Request,
    },
    http::request::Parts,
    Json,
};
use axum_extra::extract::{Query, QueryRejection};
use serde::de::DeserializeOwned;

use crate::server::error::{validation::ValidationError, Error};

/// JSON body extractor reporting rejections as [`ValidationError::MalformedBody`].
///
/// Unknown fields are left to the payload type: write DTOs deny them so a misspelled field
/// is rejected instead of silently ignored.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(malformed(rejection).into()),
        }
    }
}

/// Path parameter extractor, a non-numeric id is a [`ValidationError::InvalidQuery`]
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_path(rejection).into()),
        }
    }
}

/// Query string extractor accepting repeated keys such as `tags=a&tags=b`.
///
/// Rejections are reported as [`ValidationError::InvalidQuery`].
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(invalid_query(rejection).into()),
        }
    }
}

fn malformed(rejection: JsonRejection) -> ValidationError {
    ValidationError::MalformedBody(rejection.body_text())
}

fn invalid_path(rejection: PathRejection) -> ValidationError {
    ValidationError::InvalidQuery(rejection.body_text())
}

fn invalid_query(rejection: QueryRejection) -> ValidationError {
    ValidationError::InvalidQuery(rejection.to_string())
}
