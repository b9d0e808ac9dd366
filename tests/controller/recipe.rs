use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
};
use foodgram::{
    model::recipe::{RecipeListQuery, RecipeWriteDto},
    server::{
        controller::{
            recipe::{
                add_favorite, add_to_shopping_cart, create_recipe, delete_recipe,
                download_shopping_cart, get_recipe, get_recipe_image, list_recipes,
                remove_favorite, update_recipe,
            },
            util::extract::{ApiJson, ApiPath, ApiQuery},
        },
        model::app::AppState,
    },
};
use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

fn write_dto(tags: &[i32], ingredients: &[(i32, i32)]) -> Result<RecipeWriteDto, TestError> {
    Ok(serde_json::from_value(factory::recipe_payload(
        tags,
        ingredients,
    ))?)
}

/// Alice (ID 1) and Bob (ID 2) with one tag and two ingredients, Alice is logged in
async fn setup() -> Result<TestSetup, TestError> {
    let mut test = TestBuilder::new()
        .with_recipe_tables()
        .with_user("alice")
        .with_user("bob")
        .build()
        .await?;
    test.recipe().insert_tag("Breakfast", "breakfast").await?;
    test.recipe().insert_ingredient("Flour", "g").await?;
    test.recipe().insert_ingredient("Milk", "ml").await?;
    log_in(&test.session, 1).await;

    Ok(test)
}

mod create {
    use super::*;

    /// Expect 201 with tags and ingredients expanded
    #[tokio::test]
    async fn creates_recipe() -> Result<(), TestError> {
        let test = setup().await?;

        let result = create_recipe(
            State(test.state()),
            test.session.clone(),
            ApiJson(write_dto(&[1], &[(1, 10)])?),
        )
        .await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(body["tags"][0]["slug"], "breakfast");
        assert_eq!(body["ingredients"][0]["name"], "Flour");
        assert_eq!(body["ingredients"][0]["measurement_unit"], "g");
        assert_eq!(body["ingredients"][0]["amount"], 10);
        assert_eq!(body["author"]["username"], "alice");
        assert_eq!(body["image"], format!("/api/recipes/{}/image", body["id"]));

        Ok(())
    }

    /// Expect 400 and no stored recipe for a duplicate ingredient
    #[tokio::test]
    async fn rejects_duplicate_ingredient() -> Result<(), TestError> {
        let test = setup().await?;

        let result = create_recipe(
            State(test.state()),
            test.session.clone(),
            ApiJson(write_dto(&[1], &[(1, 10), (1, 20)])?),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);

        let recipes = entity::prelude::Recipe::find()
            .count(&test.state.db)
            .await?;
        assert_eq!(recipes, 0);

        Ok(())
    }

    /// Expect 400 and no stored recipe for an unknown ingredient
    #[tokio::test]
    async fn rejects_unknown_ingredient() -> Result<(), TestError> {
        let test = setup().await?;

        let result = create_recipe(
            State(test.state()),
            test.session.clone(),
            ApiJson(write_dto(&[1], &[(1, 10), (99, 1)])?),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);

        let recipes = entity::prelude::Recipe::find()
            .count(&test.state.db)
            .await?;
        assert_eq!(recipes, 0);

        Ok(())
    }

    /// Expect 401 for anonymous authors
    #[tokio::test]
    async fn requires_session() -> Result<(), TestError> {
        let test = setup().await?;

        let result = create_recipe(
            State(test.state()),
            test.new_session(),
            ApiJson(write_dto(&[1], &[(1, 10)])?),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}

mod update {
    use super::*;

    /// Expect the composition to be replaced and untouched fields kept
    #[tokio::test]
    async fn replaces_composition() -> Result<(), TestError> {
        let mut test = setup().await?;
        let recipe = test.recipe().insert_recipe(1, "Pancakes").await?;
        test.recipe().insert_recipe_ingredient(recipe.id, 1, 200).await?;

        let mut payload = RecipeWriteDto {
            tags: Some(vec![1]),
            ..Default::default()
        };
        payload.ingredients = write_dto(&[1], &[(2, 300)])?.ingredients;

        let result = update_recipe(
            State(test.state()),
            test.session.clone(),
            ApiPath(recipe.id),
            ApiJson(payload),
        )
        .await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["name"], "Pancakes");
        assert_eq!(body["cooking_time"], 15);
        assert_eq!(body["ingredients"].as_array().unwrap().len(), 1);
        assert_eq!(body["ingredients"][0]["name"], "Milk");
        assert_eq!(body["ingredients"][0]["amount"], 300);

        Ok(())
    }

    /// Expect 403 when updating someone else's recipe
    #[tokio::test]
    async fn rejects_non_author() -> Result<(), TestError> {
        let mut test = setup().await?;
        let recipe = test.recipe().insert_recipe(2, "Soup").await?;

        let result = update_recipe(
            State(test.state()),
            test.session.clone(),
            ApiPath(recipe.id),
            ApiJson(write_dto(&[1], &[(1, 10)])?),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::FORBIDDEN);

        Ok(())
    }

    /// Expect 400 when tags are missing from the update
    #[tokio::test]
    async fn requires_tags() -> Result<(), TestError> {
        let mut test = setup().await?;
        let recipe = test.recipe().insert_recipe(1, "Pancakes").await?;

        let mut payload = write_dto(&[1], &[(1, 10)])?;
        payload.tags = None;

        let result = update_recipe(
            State(test.state()),
            test.session.clone(),
            ApiPath(recipe.id),
            ApiJson(payload),
        )
        .await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Field `tags` is required");

        Ok(())
    }
}

mod delete {
    use super::*;

    /// Expect 403 for a non-author, then 204 for the author and 404 afterwards
    #[tokio::test]
    async fn only_author_deletes() -> Result<(), TestError> {
        let mut test = setup().await?;
        let recipe = test.recipe().insert_recipe(2, "Soup").await?;

        let forbidden =
            delete_recipe(State(test.state()), test.session.clone(), ApiPath(recipe.id)).await;
        assert_eq!(forbidden.into_response().status(), StatusCode::FORBIDDEN);

        let bob = test.new_session();
        log_in(&bob, 2).await;

        let deleted = delete_recipe(State(test.state()), bob.clone(), ApiPath(recipe.id)).await;
        assert_eq!(deleted.into_response().status(), StatusCode::NO_CONTENT);

        let missing = get_recipe(State(test.state()), bob, ApiPath(recipe.id)).await;
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod listing {
    use super::*;

    async fn list(test: &TestSetup, uri: &str, query: RecipeListQuery) -> serde_json::Value {
        let result = list_recipes(
            State(test.state::<AppState>()),
            test.session.clone(),
            uri.parse().unwrap(),
            ApiQuery(query),
        )
        .await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        body_json(resp).await
    }

    /// Expect newest recipes first with viewer flags set
    #[tokio::test]
    async fn lists_newest_first_with_flags() -> Result<(), TestError> {
        let mut test = setup().await?;
        let older = test.recipe().insert_recipe(2, "Soup").await?;
        let newer = test.recipe().insert_recipe(2, "Stew").await?;
        test.recipe().insert_favorite(1, older.id).await?;

        let body = list(&test, "/api/recipes/", RecipeListQuery::default()).await;

        assert_eq!(body["count"], 2);
        assert_eq!(body["results"][0]["id"], newer.id);
        assert_eq!(body["results"][1]["id"], older.id);
        assert_eq!(body["results"][1]["is_favorited"], true);
        assert_eq!(body["results"][0]["is_favorited"], false);

        Ok(())
    }

    /// Expect `is_favorited=1` to include favorites and any other value to exclude them
    #[tokio::test]
    async fn filters_by_favorites() -> Result<(), TestError> {
        let mut test = setup().await?;
        let favorite = test.recipe().insert_recipe(2, "Soup").await?;
        let other = test.recipe().insert_recipe(2, "Stew").await?;
        test.recipe().insert_favorite(1, favorite.id).await?;

        let only = list(
            &test,
            "/api/recipes/?is_favorited=1",
            RecipeListQuery {
                is_favorited: Some("1".to_string()),
                ..Default::default()
            },
        )
        .await;
        let excluding = list(
            &test,
            "/api/recipes/?is_favorited=0",
            RecipeListQuery {
                is_favorited: Some("0".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(only["count"], 1);
        assert_eq!(only["results"][0]["id"], favorite.id);
        assert_eq!(excluding["count"], 1);
        assert_eq!(excluding["results"][0]["id"], other.id);

        Ok(())
    }

    /// Expect OR-combined tag slugs and no rows for an unknown slug
    #[tokio::test]
    async fn filters_by_tags() -> Result<(), TestError> {
        let mut test = setup().await?;
        let dinner = test.recipe().insert_tag("Dinner", "dinner").await?;
        let pancakes = test.recipe().insert_recipe(1, "Pancakes").await?;
        let stew = test.recipe().insert_recipe(2, "Stew").await?;
        test.recipe().insert_recipe(2, "Untagged").await?;
        test.recipe().insert_recipe_tag(pancakes.id, 1, 0).await?;
        test.recipe().insert_recipe_tag(stew.id, dinner.id, 0).await?;

        let both = list(
            &test,
            "/api/recipes/?tags=breakfast&tags=dinner",
            RecipeListQuery {
                tags: vec!["breakfast".to_string(), "dinner".to_string()],
                ..Default::default()
            },
        )
        .await;
        let unknown = list(
            &test,
            "/api/recipes/?tags=brunch",
            RecipeListQuery {
                tags: vec!["brunch".to_string()],
                ..Default::default()
            },
        )
        .await;

        assert_eq!(both["count"], 2);
        assert_eq!(unknown["count"], 0);

        Ok(())
    }

    /// Expect no recipes for an anonymous `is_in_shopping_cart=1` and all of them otherwise
    #[tokio::test]
    async fn anonymous_membership_filters() -> Result<(), TestError> {
        let mut test = setup().await?;
        test.recipe().insert_recipe(2, "Soup").await?;
        test.session = test.new_session();

        let only = list(
            &test,
            "/api/recipes/?is_in_shopping_cart=1",
            RecipeListQuery {
                is_in_shopping_cart: Some("1".to_string()),
                ..Default::default()
            },
        )
        .await;
        let other = list(
            &test,
            "/api/recipes/?is_in_shopping_cart=0",
            RecipeListQuery {
                is_in_shopping_cart: Some("0".to_string()),
                ..Default::default()
            },
        )
        .await;

        assert_eq!(only["count"], 0);
        assert_eq!(other["count"], 1);

        Ok(())
    }
}

mod relations {
    use super::*;

    /// Expect 201 with the minified recipe, then 400 on a repeat
    #[tokio::test]
    async fn favorites_once() -> Result<(), TestError> {
        let mut test = setup().await?;
        let recipe = test.recipe().insert_recipe(2, "Soup").await?;

        let added =
            add_favorite(State(test.state()), test.session.clone(), ApiPath(recipe.id)).await;

        let resp = added.into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body = body_json(resp).await;
        assert_eq!(body["id"], recipe.id);
        assert_eq!(body["name"], "Soup");
        assert_eq!(body["cooking_time"], 15);

        let repeat =
            add_favorite(State(test.state()), test.session.clone(), ApiPath(recipe.id)).await;
        assert_eq!(repeat.into_response().status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 400 when removing a recipe that was never favorited
    #[tokio::test]
    async fn rejects_removing_missing_favorite() -> Result<(), TestError> {
        let mut test = setup().await?;
        let recipe = test.recipe().insert_recipe(2, "Soup").await?;

        let result =
            remove_favorite(State(test.state()), test.session.clone(), ApiPath(recipe.id)).await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(resp).await["error"], "Recipe is not in favorites");

        Ok(())
    }

    /// Expect 404 when favoriting an unknown recipe
    #[tokio::test]
    async fn rejects_unknown_recipe() -> Result<(), TestError> {
        let test = setup().await?;

        let result =
            add_to_shopping_cart(State(test.state()), test.session.clone(), ApiPath(99)).await;

        assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod shopping_cart {
    use super::*;

    /// Expect 400 when the shopping cart is empty
    #[tokio::test]
    async fn rejects_empty_cart() -> Result<(), TestError> {
        let test = setup().await?;

        let result = download_shopping_cart(State(test.state()), test.session.clone()).await;

        assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect a CSV attachment with amounts summed per ingredient
    #[tokio::test]
    async fn downloads_aggregated_list() -> Result<(), TestError> {
        let mut test = setup().await?;
        let pancakes = test.recipe().insert_recipe(1, "Pancakes").await?;
        let bread = test.recipe().insert_recipe(2, "Bread").await?;
        test.recipe().insert_recipe_ingredient(pancakes.id, 1, 200).await?;
        test.recipe().insert_recipe_ingredient(pancakes.id, 2, 250).await?;
        test.recipe().insert_recipe_ingredient(bread.id, 1, 300).await?;
        test.recipe().insert_shopping_cart(1, pancakes.id).await?;
        test.recipe().insert_shopping_cart(1, bread.id).await?;

        let result = download_shopping_cart(State(test.state()), test.session.clone()).await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/csv"));
        assert_eq!(
            resp.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"shopping_cart.csv\""
        );

        let body = String::from_utf8(body_bytes(resp).await).unwrap();
        assert_eq!(
            body,
            "ingredient,total_amount,unit\r\nFlour,500,g\r\nMilk,250,ml\r\n"
        );

        Ok(())
    }
}

mod image {
    use super::*;

    /// Expect the stored image bytes with their content type
    #[tokio::test]
    async fn serves_stored_image() -> Result<(), TestError> {
        let test = setup().await?;

        let created = create_recipe(
            State(test.state()),
            test.session.clone(),
            ApiJson(write_dto(&[1], &[(1, 10)])?),
        )
        .await;
        let recipe_id = body_json(created.into_response()).await["id"]
            .as_i64()
            .unwrap() as i32;

        let result = get_recipe_image(State(test.state()), ApiPath(recipe_id)).await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "image/png");
        assert!(body_bytes(resp).await.starts_with(b"\x89PNG"));

        Ok(())
    }

    /// Expect 404 for a recipe stored without an image
    #[tokio::test]
    async fn returns_not_found_without_image() -> Result<(), TestError> {
        let mut test = setup().await?;
        let recipe = test.recipe().insert_recipe(1, "Pancakes").await?;

        let result = get_recipe_image(State(test.state()), ApiPath(recipe.id)).await;

        assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
