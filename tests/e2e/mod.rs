//! End-to-end tests through the full router with an in-memory session store.
//!
//! Users register and log in over HTTP, the session cookie from the login response
//! authenticates every later request.

mod favorite;
mod image;
mod recipe;

use axum::http::{Method, StatusCode};
use foodgram_test_utils::prelude::*;
use serde_json::json;

use crate::util::http::{body_bytes, body_json, TestApp};

/// Insert the `Breakfast` tag and the `Flour` ingredient, both with ID 1
async fn reference_data(test: &mut TestSetup) -> Result<(), TestError> {
    test.recipe().insert_tag("Breakfast", "breakfast").await?;
    test.recipe().insert_ingredient("Flour", "g").await?;

    Ok(())
}

/// Create a recipe over HTTP, returning its ID
async fn create_recipe(app: &TestApp, cookie: &str) -> i64 {
    let response = app
        .json(
            Method::POST,
            "/api/recipes/",
            Some(cookie),
            Some(factory::recipe_payload(&[1], &[(1, 10)])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    body_json(response).await["id"].as_i64().unwrap()
}
