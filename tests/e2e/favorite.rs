use super::*;

/// Expect favorite toggles to succeed once and be rejected when repeated
#[tokio::test]
async fn favorite_toggle() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    reference_data(&mut test).await?;
    let app = TestApp::new(&test);

    let alice = app.register_and_log_in("alice").await;
    let recipe_id = create_recipe(&app, &alice).await;
    let favorite_uri = format!("/api/recipes/{}/favorite/", recipe_id);

    let response = app.json(Method::POST, &favorite_uri, None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.json(Method::POST, &favorite_uri, Some(&alice), None).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["id"], recipe_id);

    let response = app.json(Method::POST, &favorite_uri, Some(&alice), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.json(Method::DELETE, &favorite_uri, Some(&alice), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.json(Method::DELETE, &favorite_uri, Some(&alice), None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect the recipe to report the favorite to its owner only
#[tokio::test]
async fn favorite_is_per_user() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    reference_data(&mut test).await?;
    let app = TestApp::new(&test);

    let alice = app.register_and_log_in("alice").await;
    let bob = app.register_and_log_in("bob").await;
    let recipe_id = create_recipe(&app, &alice).await;
    let recipe_uri = format!("/api/recipes/{}/", recipe_id);

    let response = app
        .json(
            Method::POST,
            &format!("/api/recipes/{}/favorite/", recipe_id),
            Some(&bob),
            None,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app.json(Method::GET, &recipe_uri, Some(&bob), None).await;
    assert_eq!(body_json(response).await["is_favorited"], true);

    let response = app.json(Method::GET, &recipe_uri, Some(&alice), None).await;
    assert_eq!(body_json(response).await["is_favorited"], false);

    Ok(())
}
