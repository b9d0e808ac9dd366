use axum::{
    extract::{Multipart, State},
    http::{header, StatusCode, Uri},
    response::IntoResponse,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, PaginatedDto},
        recipe::{
            RecipeImageForm, RecipeListQuery, RecipeMinifiedDto, RecipeReadDto, RecipeWriteDto,
        },
    },
    server::{
        controller::util::{
            extract::{ApiJson, ApiPath, ApiQuery},
            get_user::{get_user_from_session, get_viewer_id},
            pagination::paginated,
        },
        error::{validation::ValidationError, Error},
        model::{
            app::AppState,
            relation::{RelationTarget, Toggle},
        },
        service::{
            recipe::RecipeService,
            relation::RelationService,
            shopping_cart::{ShoppingCartService, SHOPPING_LIST_FILENAME},
        },
        util::image::from_upload,
    },
};

pub static RECIPE_TAG: &str = "recipe";

/// Name of the multipart field carrying an uploaded recipe image
const IMAGE_FIELD: &str = "image";

/// List recipes, newest first
///
/// `is_favorited` and `is_in_shopping_cart` include only matching recipes when set to `1` and
/// exclude them for any other value. Anonymous viewers get no recipes when either is `1`.
#[utoipa::path(
    get,
    path = "/api/recipes/",
    tag = RECIPE_TAG,
    params(RecipeListQuery),
    responses(
        (status = 200, description = "A page of recipes", body = PaginatedDto<RecipeReadDto>),
        (status = 400, description = "Invalid page or limit", body = ErrorDto),
        (status = 404, description = "Page does not exist", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_recipes(
    State(state): State<AppState>,
    session: Session,
    uri: Uri,
    ApiQuery(query): ApiQuery<RecipeListQuery>,
) -> Result<impl IntoResponse, Error> {
    let viewer_id = get_viewer_id(&state, &session).await?;

    let page = RecipeService::new(&state.db, &state.config)
        .list_recipes(viewer_id, &query)
        .await?;

    Ok((StatusCode::OK, axum::Json(paginated(page, &uri))).into_response())
}

/// Publish a recipe
///
/// Every field is required, tags and ingredients must reference existing rows and an
/// ingredient may only be listed once.
#[utoipa::path(
    post,
    path = "/api/recipes/",
    tag = RECIPE_TAG,
    request_body = RecipeWriteDto,
    responses(
        (status = 201, description = "Recipe created", body = RecipeReadDto),
        (status = 400, description = "Invalid recipe", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn create_recipe(
    State(state): State<AppState>,
    session: Session,
    ApiJson(payload): ApiJson<RecipeWriteDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let recipe = RecipeService::new(&state.db, &state.config)
        .create(user.id, payload)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(recipe)).into_response())
}

#[utoipa::path(
    get,
    path = "/api/recipes/{id}/",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe", body = RecipeReadDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_recipe(
    State(state): State<AppState>,
    session: Session,
    ApiPath(recipe_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    let viewer_id = get_viewer_id(&state, &session).await?;

    let recipe = RecipeService::new(&state.db, &state.config)
        .get_recipe(viewer_id, recipe_id)
        .await?;

    Ok((StatusCode::OK, axum::Json(recipe)).into_response())
}

/// Update a recipe
///
/// `tags` and `ingredients` are required and replace the stored composition, the remaining
/// fields keep their stored value when omitted.
#[utoipa::path(
    patch,
    path = "/api/recipes/{id}/",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = RecipeWriteDto,
    responses(
        (status = 200, description = "Recipe updated", body = RecipeReadDto),
        (status = 400, description = "Invalid recipe", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author of the recipe", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_recipe(
    State(state): State<AppState>,
    session: Session,
    ApiPath(recipe_id): ApiPath<i32>,
    ApiJson(payload): ApiJson<RecipeWriteDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let recipe = RecipeService::new(&state.db, &state.config)
        .update(user.id, recipe_id, payload)
        .await?;

    Ok((StatusCode::OK, axum::Json(recipe)).into_response())
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted"),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author of the recipe", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn delete_recipe(
    State(state): State<AppState>,
    session: Session,
    ApiPath(recipe_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    RecipeService::new(&state.db, &state.config)
        .delete(user.id, recipe_id)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/favorite/",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Added to favorites", body = RecipeMinifiedDto),
        (status = 400, description = "Already in favorites", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_favorite(
    State(state): State<AppState>,
    session: Session,
    ApiPath(recipe_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    toggle(&state, &session, RelationTarget::Favorite { recipe_id }, Toggle::Add).await
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/favorite/",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Removed from favorites"),
        (status = 400, description = "Not in favorites", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_favorite(
    State(state): State<AppState>,
    session: Session,
    ApiPath(recipe_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    toggle(&state, &session, RelationTarget::Favorite { recipe_id }, Toggle::Remove).await
}

#[utoipa::path(
    post,
    path = "/api/recipes/{id}/shopping_cart/",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 201, description = "Added to the shopping cart", body = RecipeMinifiedDto),
        (status = 400, description = "Already in the shopping cart", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn add_to_shopping_cart(
    State(state): State<AppState>,
    session: Session,
    ApiPath(recipe_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    toggle(&state, &session, RelationTarget::ShoppingCart { recipe_id }, Toggle::Add).await
}

#[utoipa::path(
    delete,
    path = "/api/recipes/{id}/shopping_cart/",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Removed from the shopping cart"),
        (status = 400, description = "Not in the shopping cart", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn remove_from_shopping_cart(
    State(state): State<AppState>,
    session: Session,
    ApiPath(recipe_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    toggle(
        &state,
        &session,
        RelationTarget::ShoppingCart { recipe_id },
        Toggle::Remove,
    )
    .await
}

async fn toggle(
    state: &AppState,
    session: &Session,
    target: RelationTarget,
    toggle: Toggle,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(state, session).await?;

    let outcome = RelationService::new(&state.db)
        .toggle(user.id, target, toggle)
        .await?;

    Ok(outcome.into_response())
}

/// Download the shopping list
///
/// Sums the ingredients of every recipe in the shopping cart per name and measurement unit.
#[utoipa::path(
    get,
    path = "/api/recipes/download_shopping_cart/",
    tag = RECIPE_TAG,
    responses(
        (status = 200, description = "CSV with `ingredient,total_amount,unit` columns", body = String, content_type = "text/csv"),
        (status = 400, description = "Shopping cart is empty", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let csv = ShoppingCartService::new(&state.db)
        .shopping_list_csv(user.id)
        .await?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", SHOPPING_LIST_FILENAME),
        ),
    ];

    Ok((StatusCode::OK, headers, csv).into_response())
}

/// Get the image of a recipe
#[utoipa::path(
    get,
    path = "/api/recipes/{id}/image",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Image bytes with their stored content type", body = Vec<u8>, content_type = "image/*"),
        (status = 404, description = "Recipe or image not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_recipe_image(
    State(state): State<AppState>,
    ApiPath(recipe_id): ApiPath<i32>,
) -> Result<impl IntoResponse, Error> {
    let image = RecipeService::new(&state.db, &state.config)
        .get_image(recipe_id)
        .await?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, image.content_type)],
        image.data,
    )
        .into_response())
}

/// Replace the image of a recipe with a multipart upload
#[utoipa::path(
    put,
    path = "/api/recipes/{id}/image",
    tag = RECIPE_TAG,
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body(content = RecipeImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 204, description = "Image replaced"),
        (status = 400, description = "Missing or unsupported image", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "Not the author of the recipe", body = ErrorDto),
        (status = 404, description = "Recipe not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn upload_recipe_image(
    State(state): State<AppState>,
    session: Session,
    ApiPath(recipe_id): ApiPath<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, Error> {
    let user = get_user_from_session(&state, &session).await?;

    let mut image = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ValidationError::MalformedBody(e.body_text()))?
    {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| ValidationError::MalformedBody(e.body_text()))?;

        image = Some(from_upload(
            content_type.as_deref(),
            data.to_vec(),
            state.config.max_image_bytes,
        )?);
        break;
    }

    let Some(image) = image else {
        return Err(ValidationError::MissingField(IMAGE_FIELD).into());
    };

    RecipeService::new(&state.db, &state.config)
        .upload_image(user.id, recipe_id, image)
        .await?;

    Ok(StatusCode::NO_CONTENT.into_response())
}
