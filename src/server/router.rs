//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its OpenAPI path definition. Swagger
//! UI is served at `/api/docs`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, model::app::AppState};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers sharing a path are registered together so the router dispatches on method.
///
/// # Registered Endpoints
/// - `/api/auth/token/...` - Session login and logout
/// - `/api/users/...` - Registration, profiles, password change and subscriptions
/// - `/api/tags/...`, `/api/ingredients/...` - Read-only reference data
/// - `/api/recipes/...` - Recipe CRUD, favorites, shopping cart, shopping list and images
///
/// The OpenAPI document is served at `/api/docs/openapi.json`.
///
/// # Example
/// ```ignore
/// let app_state = AppState { db, config: config.api };
/// let router = routes().with_state(app_state);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Foodgram", description = "Foodgram recipe sharing API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Session authentication"),
        (name = controller::user::USER_TAG, description = "Users, profiles and subscriptions"),
        (name = controller::tag::TAG_TAG, description = "Recipe tags"),
        (name = controller::ingredient::INGREDIENT_TAG, description = "Ingredient reference data"),
        (name = controller::recipe::RECIPE_TAG, description = "Recipes, favorites and shopping cart"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::login))
        .routes(routes!(controller::auth::logout))
        .routes(routes!(
            controller::user::list_users,
            controller::user::register
        ))
        .routes(routes!(controller::user::get_me))
        .routes(routes!(controller::user::set_password))
        .routes(routes!(controller::user::list_subscriptions))
        .routes(routes!(controller::user::get_user))
        .routes(routes!(
            controller::user::subscribe,
            controller::user::unsubscribe
        ))
        .routes(routes!(controller::tag::list_tags))
        .routes(routes!(controller::tag::get_tag))
        .routes(routes!(controller::ingredient::list_ingredients))
        .routes(routes!(controller::ingredient::get_ingredient))
        .routes(routes!(
            controller::recipe::list_recipes,
            controller::recipe::create_recipe
        ))
        .routes(routes!(controller::recipe::download_shopping_cart))
        .routes(routes!(
            controller::recipe::get_recipe,
            controller::recipe::update_recipe,
            controller::recipe::delete_recipe
        ))
        .routes(routes!(
            controller::recipe::add_favorite,
            controller::recipe::remove_favorite
        ))
        .routes(routes!(
            controller::recipe::add_to_shopping_cart,
            controller::recipe::remove_from_shopping_cart
        ))
        .routes(routes!(
            controller::recipe::get_recipe_image,
            controller::recipe::upload_recipe_image
        ))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
