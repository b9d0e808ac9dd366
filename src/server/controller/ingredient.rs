use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    model::{api::ErrorDto, recipe::IngredientDto},
    server::{
        controller::util::extract::{ApiPath, ApiQuery},
        error::Error,
        model::app::AppState,
        service::ingredient::IngredientService,
    },
};

pub static INGREDIENT_TAG: &str = "ingredient";

/// Search ingredients by name prefix
///
/// The name of the search parameter is configurable and defaults to `name`. Without it every
/// ingredient is returned.
#[utoipa::path(
    get,
    path = "/api/ingredients/",
    tag = INGREDIENT_TAG,
    params(("name" = Option<String>, Query, description = "Case-insensitive name prefix")),
    responses(
        (status = 200, description = "Matching ingredients ordered by name", body = Vec<IngredientDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_ingredients(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<HashMap<String, String>>,
) -> Result<impl IntoResponse, Error> {
    let prefix = params.get(&state.config.ingredient_search_param);

    let ingredients = IngredientService::new(&state.db)
        .search(prefix.map(String::as_str))
        .await?;

    Ok((StatusCode::OK, axum::Json(ingredients)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/ingredients/{id}/",
    tag = INGREDIENT_TAG,
    params(("id" = i32, Path, description = "Ingredient ID")),
    responses(
        (status = 200, description = "Ingredient", body = IngredientDto),
        (status = 404, description = "Ingredient not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ingredient(
    State(state): State<AppState>,
    ApiPath(ingredient_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    let ingredient = IngredientService::new(&state.db)
        .get_ingredient(ingredient_id)
        .await?;

    Ok((StatusCode::OK, axum::Json(ingredient)).into_response())
}
