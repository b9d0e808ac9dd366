use super::*;

/// Expect the recipe lifecycle: create, rejected update, forbidden and allowed deletion
#[tokio::test]
async fn recipe_lifecycle() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    reference_data(&mut test).await?;
    let app = TestApp::new(&test);

    let alice = app.register_and_log_in("alice").await;
    let bob = app.register_and_log_in("bob").await;

    let response = app
        .json(
            Method::POST,
            "/api/recipes/",
            Some(&alice),
            Some(factory::recipe_payload(&[1], &[(1, 10)])),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    let recipe_id = body["id"].as_i64().unwrap();
    assert_eq!(body["tags"][0]["id"], 1);
    assert_eq!(body["tags"][0]["name"], "Breakfast");
    assert_eq!(body["ingredients"][0]["id"], 1);
    assert_eq!(body["ingredients"][0]["name"], "Flour");
    assert_eq!(body["ingredients"][0]["amount"], 10);
    let recipe_uri = format!("/api/recipes/{}/", recipe_id);

    let response = app
        .json(
            Method::PATCH,
            &recipe_uri,
            Some(&alice),
            Some(json!({ "tagsss": [1], "ingredients": [{ "id": 1, "amount": 5 }] })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.json(Method::DELETE, &recipe_uri, Some(&bob), None).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = app.json(Method::DELETE, &recipe_uri, Some(&alice), None).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.json(Method::GET, &recipe_uri, None, None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect a malformed JSON body to produce a JSON error body
#[tokio::test]
async fn rejects_malformed_json() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;
    let app = TestApp::new(&test);
    let alice = app.register_and_log_in("alice").await;

    let request = axum::http::Request::builder()
        .method(Method::POST)
        .uri("/api/recipes/")
        .header(axum::http::header::COOKIE, &alice)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{\"name\": "))
        .unwrap();

    let response = app.send(request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .starts_with("Malformed request body"));

    Ok(())
}

/// Expect a non-numeric recipe ID to produce a JSON error body
#[tokio::test]
async fn rejects_non_numeric_recipe_id() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;
    let app = TestApp::new(&test);

    let response = app.json(Method::GET, "/api/recipes/abc/", None, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid query parameter"));

    Ok(())
}

/// Expect a non-numeric page to produce a JSON error body
#[tokio::test]
async fn rejects_non_numeric_page() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;
    let app = TestApp::new(&test);

    let response = app.json(Method::GET, "/api/recipes/?page=abc", None, None).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid query parameter"));

    Ok(())
}

/// Expect paginated listings to link to neighbouring pages, keeping other parameters
#[tokio::test]
async fn links_neighbouring_pages() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    reference_data(&mut test).await?;
    let app = TestApp::new(&test);
    let alice = app.register_and_log_in("alice").await;

    for _ in 0..3 {
        create_recipe(&app, &alice).await;
    }

    let response = app
        .json(Method::GET, "/api/recipes/?limit=1&tags=breakfast&page=2", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["count"], 3);
    assert_eq!(body["next"], "/api/recipes/?limit=1&tags=breakfast&page=3");
    assert_eq!(body["previous"], "/api/recipes/?limit=1&tags=breakfast");

    let response = app
        .json(Method::GET, "/api/recipes/?limit=1&page=4", None, None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    Ok(())
}

/// Expect the shopping list download to sum the cart and require a non-empty cart
#[tokio::test]
async fn downloads_shopping_list() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    reference_data(&mut test).await?;
    let app = TestApp::new(&test);
    let alice = app.register_and_log_in("alice").await;

    let response = app
        .json(Method::GET, "/api/recipes/download_shopping_cart/", Some(&alice), None)
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    for _ in 0..2 {
        let recipe_id = create_recipe(&app, &alice).await;
        let response = app
            .json(
                Method::POST,
                &format!("/api/recipes/{}/shopping_cart/", recipe_id),
                Some(&alice),
                None,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = app
        .json(Method::GET, "/api/recipes/download_shopping_cart/", Some(&alice), None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = String::from_utf8(body_bytes(response).await).unwrap();
    assert_eq!(body, "ingredient,total_amount,unit\r\nFlour,20,g\r\n");

    Ok(())
}
