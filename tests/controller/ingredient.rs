use std::collections::HashMap;

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use foodgram::server::{
    controller::{
        ingredient::{get_ingredient, list_ingredients},
        util::extract::{ApiPath, ApiQuery},
    },
    model::app::AppState,
};

use super::*;

async fn setup() -> Result<TestSetup, TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    test.recipe().insert_ingredient("Flour", "g").await?;
    test.recipe().insert_ingredient("flaxseed", "g").await?;
    test.recipe().insert_ingredient("Milk", "ml").await?;

    Ok(test)
}

fn names(body: &serde_json::Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|ingredient| ingredient["name"].as_str().unwrap().to_string())
        .collect()
}

/// Expect a case-insensitive prefix match on the default search parameter
#[tokio::test]
async fn searches_by_prefix() -> Result<(), TestError> {
    let test = setup().await?;

    let params = HashMap::from([("name".to_string(), "FL".to_string())]);
    let result = list_ingredients(State(test.state()), ApiQuery(params)).await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(names(&body_json(resp).await), vec!["Flour", "flaxseed"]);

    Ok(())
}

/// Expect every ingredient without a search parameter
#[tokio::test]
async fn lists_everything_without_search() -> Result<(), TestError> {
    let test = setup().await?;

    let result = list_ingredients(State(test.state()), ApiQuery(HashMap::new())).await;

    let body = body_json(result.into_response()).await;
    assert_eq!(names(&body).len(), 3);

    Ok(())
}

/// Expect the configured search parameter to be used instead of `name`
#[tokio::test]
async fn uses_configured_search_parameter() -> Result<(), TestError> {
    let test = setup().await?;
    let mut state: AppState = test.state();
    state.config.ingredient_search_param = "q".to_string();

    let params = HashMap::from([
        ("q".to_string(), "mi".to_string()),
        ("name".to_string(), "fl".to_string()),
    ]);
    let result = list_ingredients(State(state), ApiQuery(params)).await;

    let body = body_json(result.into_response()).await;
    assert_eq!(names(&body), vec!["Milk"]);

    Ok(())
}

/// Expect 404 for an unknown ingredient
#[tokio::test]
async fn returns_not_found_for_unknown_ingredient() -> Result<(), TestError> {
    let test = setup().await?;

    let found = get_ingredient(State(test.state()), ApiPath(1)).await;
    let missing = get_ingredient(State(test.state()), ApiPath(99)).await;

    assert_eq!(found.into_response().status(), StatusCode::OK);
    assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

    Ok(())
}
