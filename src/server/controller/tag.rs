use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{api::ErrorDto, recipe::TagDto},
    server::{
        controller::util::extract::ApiPath, error::Error, model::app::AppState,
        service::tag::TagService,
    },
};

pub static TAG_TAG: &str = "tag";

/// List every tag
#[utoipa::path(
    get,
    path = "/api/tags/",
    tag = TAG_TAG,
    responses(
        (status = 200, description = "All tags, not paginated", body = Vec<TagDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_tags(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let tags = TagService::new(&state.db).list_tags().await?;

    Ok((StatusCode::OK, axum::Json(tags)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/tags/{id}/",
    tag = TAG_TAG,
    params(("id" = i32, Path, description = "Tag ID")),
    responses(
        (status = 200, description = "Tag", body = TagDto),
        (status = 404, description = "Tag not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_tag(
    State(state): State<AppState>,
    ApiPath(tag_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    let tag = TagService::new(&state.db).get_tag(tag_id).await?;

    Ok((StatusCode::OK, axum::Json(tag)).into_response())
}
