use axum::{extract::State, http::StatusCode, response::IntoResponse};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        user::{LoginDto, UserDto},
    },
    server::{
        controller::util::{extract::ApiJson, get_user::get_user_from_session},
        error::Error,
        model::{app::AppState, recipe::user_dto, session::user::SessionUserId},
        service::auth::AuthService,
    },
};

pub static AUTH_TAG: &str = "auth";

/// Log in with email and password
///
/// Stores the user ID in the session, the session cookie authenticates every later request.
#[utoipa::path(
    post,
    path = "/api/auth/token/login/",
    tag = AUTH_TAG,
    request_body = LoginDto,
    responses(
        (status = 200, description = "Logged in, returns the user profile", body = UserDto),
        (status = 400, description = "Unknown email or wrong password", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<LoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db)
        .login(&payload.email, &payload.password)
        .await?;

    SessionUserId::insert(&session, user.id).await?;

    tracing::debug!(user_id = user.id, "User logged in");

    Ok((StatusCode::OK, axum::Json(user_dto(user, false))).into_response())
}

/// Log out by clearing the session
#[utoipa::path(
    post,
    path = "/api/auth/token/logout/",
    tag = AUTH_TAG,
    responses(
        (status = 204, description = "Logged out"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn logout(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    SessionUserId::clear(&session).await?;

    tracing::debug!(user_id = user.id, "User logged out");

    Ok(StatusCode::NO_CONTENT.into_response())
}
