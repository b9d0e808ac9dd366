use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto, PaginationQuery},
        user::{
            RecipesLimitQuery, RegisterUserDto, RegisteredUserDto, SetPasswordDto,
            SubscriptionDto, SubscriptionListQuery, UserDto,
        },
    },
    server::{
        controller::util::{
            extract::{ApiJson, ApiPath, ApiQuery},
            get_user::{get_user_from_session, get_viewer_id},
            pagination::paginated,
        },
        error::Error,
        model::{
            app::AppState,
            pagination::PageRequest,
            relation::{RelationTarget, Toggle},
        },
        service::{relation::RelationService, subscription::SubscriptionService, user::UserService},
    },
};

pub static USER_TAG: &str = "user";

/// List users
#[utoipa::path(
    get,
    path = "/api/users/",
    tag = USER_TAG,
    params(PaginationQuery),
    responses(
        (status = 200, description = "A page of user profiles", body = PaginatedDto<UserDto>),
        (status = 400, description = "Invalid page or limit", body = ErrorDto),
        (status = 404, description = "Page does not exist", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_users(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    ApiQuery(query): ApiQuery<PaginationQuery>,
) -> Result<impl IntoResponse, Error> {
    let viewer_id = get_viewer_id(&state, &session).await?;
    let request = PageRequest::resolve(query.page, query.limit, &state.config)?;

    let page = UserService::new(&state.db)
        .list_users(viewer_id, request)
        .await?;

    Ok((StatusCode::OK, axum::Json(paginated(page, &uri))).into_response())
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/users/",
    tag = USER_TAG,
    request_body = RegisterUserDto,
    responses(
        (status = 201, description = "User registered", body = RegisteredUserDto),
        (status = 400, description = "Invalid field, email or username already taken", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterUserDto>,
) -> Result<impl IntoResponse, Error> {
    let user = UserService::new(&state.db).register(payload).await?;

    Ok((StatusCode::CREATED, axum::Json(user)).into_response())
}

/// Get a user profile
#[utoipa::path(
    get,
    path = "/api/users/{id}/",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User profile", body = UserDto),
        (status = 404, description = "User not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_user(
    State(state): State<AppState>,
    session: Session,
    ApiPath(user_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    let viewer_id = get_viewer_id(&state, &session).await?;

    let user = UserService::new(&state.db)
        .get_profile(viewer_id, user_id)
        .await?;

    Ok((StatusCode::OK, axum::Json(user)).into_response())
}

/// Get the profile of the logged in user
#[utoipa::path(
    get,
    path = "/api/users/me/",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Own profile", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_me(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let profile = UserService::new(&state.db)
        .get_profile(Some(user.id), user.id)
        .await?;

    Ok((StatusCode::OK, axum::Json(profile)).into_response())
}

/// Change the password of the logged in user
#[utoipa::path(
    post,
    path = "/api/users/set_password/",
    tag = USER_TAG,
    request_body = SetPasswordDto,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Current password is incorrect", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn set_password(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<SetPasswordDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    UserService::new(&state.db)
        .set_password(user.id, payload)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Subscribe to an author
#[utoipa::path(
    post,
    path = "/api/users/{id}/subscribe/",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "Author ID"), RecipesLimitQuery),
    responses(
        (status = 201, description = "Subscribed, returns the author with their recipes", body = SubscriptionDto),
        (status = 400, description = "Already subscribed or subscribing to yourself", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Author not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn subscribe(
    State(state): State<AppState>,
    session: Session,
    ApiPath(author_id): ApiPath<i32>,
    ApiQuery(query): ApiQuery<RecipesLimitQuery>,
) -> Result<impl IntoResponse, Error> {
    toggle_subscription(&state, &session, author_id, query, Toggle::Add).await
}

/// Unsubscribe from an author
#[utoipa::path(
    delete,
    path = "/api/users/{id}/subscribe/",
    tag = USER_TAG,
    params(("id" = i32, Path, description = "Author ID")),
    responses(
        (status = 204, description = "Unsubscribed"),
        (status = 400, description = "Not subscribed", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Author not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    session: Session,
    ApiPath(author_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    toggle_subscription(
        &state,
        &session,
        author_id,
        RecipesLimitQuery::default(),
        Toggle::Remove,
    )
    .await
}

async fn toggle_subscription(
    state: &AppState,
    session: &Session,
    author_id: i32,
    query: RecipesLimitQuery,
    toggle: Toggle,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(state, session).await?;

    let target = RelationTarget::Subscription {
        author_id,
        recipes_limit: query.recipes_limit,
    };

    let outcome = RelationService::new(&state.db)
        .toggle(user.id, target, toggle)
        .await?;

    Ok(outcome.into_response())
}

/// List the authors the logged in user is subscribed to
#[utoipa::path(
    get,
    path = "/api/users/subscriptions/",
    tag = USER_TAG,
    params(SubscriptionListQuery),
    responses(
        (status = 200, description = "A page of followed authors with their recipes", body = PaginatedDto<SubscriptionDto>),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Page does not exist", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_subscriptions(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    ApiQuery(query): ApiQuery<SubscriptionListQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let page = SubscriptionService::new(&state.db, &state.config)
        .list_subscriptions(user.id, &query)
        .await?;

    Ok((StatusCode::OK, axum::Json(paginated(page, &uri))).into_response())
}
