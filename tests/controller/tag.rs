use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use foodgram::server::controller::{
    tag::{get_tag, list_tags},
    util::extract::ApiPath,
};

use super::*;

/// Expect every tag ordered by ID
#[tokio::test]
async fn lists_all_tags() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    test.recipe().insert_tag("Breakfast", "breakfast").await?;
    test.recipe().insert_tag("Dinner", "dinner").await?;

    let result = list_tags(State(test.state())).await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    let slugs: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|tag| tag["slug"].as_str().unwrap())
        .collect();
    assert_eq!(slugs, vec!["breakfast", "dinner"]);

    Ok(())
}

/// Expect a single tag by ID
#[tokio::test]
async fn gets_tag() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    let tag = test.recipe().insert_tag("Lunch", "lunch").await?;

    let result = get_tag(State(test.state()), ApiPath(tag.id)).await;

    let resp = result.into_response();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["name"], "Lunch");

    Ok(())
}

/// Expect 404 for an unknown tag
#[tokio::test]
async fn returns_not_found_for_unknown_tag() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;

    let result = get_tag(State(test.state()), ApiPath(1)).await;

    assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);

    Ok(())
}
