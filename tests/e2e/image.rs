use axum::{
    body::Body,
    http::{header, Request},
};

use super::*;

const BOUNDARY: &str = "foodgram-test-boundary";

fn multipart_request(uri: &str, cookie: &str, content_type: &str, data: &[u8]) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"image\"; filename=\"upload\"\r\n",
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .method(Method::PUT)
        .uri(uri)
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Expect an uploaded image to replace the stored one
#[tokio::test]
async fn replaces_image_with_upload() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    reference_data(&mut test).await?;
    let app = TestApp::new(&test);
    let alice = app.register_and_log_in("alice").await;
    let recipe_id = create_recipe(&app, &alice).await;
    let image_uri = format!("/api/recipes/{}/image", recipe_id);

    let response = app
        .send(multipart_request(&image_uri, &alice, "image/gif", b"GIF89a"))
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app.json(Method::GET, &image_uri, None, None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/gif");
    assert_eq!(body_bytes(response).await, b"GIF89a");

    Ok(())
}

/// Expect 403 when someone other than the author uploads an image
#[tokio::test]
async fn rejects_upload_by_non_author() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    reference_data(&mut test).await?;
    let app = TestApp::new(&test);
    let alice = app.register_and_log_in("alice").await;
    let bob = app.register_and_log_in("bob").await;
    let recipe_id = create_recipe(&app, &alice).await;

    let response = app
        .send(multipart_request(
            &format!("/api/recipes/{}/image", recipe_id),
            &bob,
            "image/png",
            b"\x89PNG",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    Ok(())
}

/// Expect 400 for an upload which is not an image
#[tokio::test]
async fn rejects_non_image_upload() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_recipe_tables().build().await?;
    reference_data(&mut test).await?;
    let app = TestApp::new(&test);
    let alice = app.register_and_log_in("alice").await;
    let recipe_id = create_recipe(&app, &alice).await;

    let response = app
        .send(multipart_request(
            &format!("/api/recipes/{}/image", recipe_id),
            &alice,
            "text/plain",
            b"hello",
        ))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    Ok(())
}
