use axum::{extract::State, http::StatusCode, response::IntoResponse};
use foodgram::{
    model::user::LoginDto,
    server::{
        controller::{
            auth::{login, logout},
            util::extract::ApiJson,
        },
        model::{app::AppState, session::user::SessionUserId},
    },
};

use super::*;

fn login_dto(username: &str, password: &str) -> LoginDto {
    LoginDto {
        email: format!("{}@example.com", username),
        password: password.to_string(),
    }
}

/// Expect 200 with the profile and the user ID stored in session after logging in
#[tokio::test]
async fn login_stores_user_in_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;
    let user_id = register_user(&test, "alice").await?;

    let result = login(
        State(test.state::<AppState>()),
        test.session.clone(),
        ApiJson(login_dto("alice", constant::TEST_PASSWORD)),
    )
    .await;

    assert!(result.is_ok());
    let resp = result.unwrap().into_response();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["id"], user_id);
    assert_eq!(body["username"], "alice");

    let session_user_id = SessionUserId::get(&test.session).await.unwrap();
    assert_eq!(session_user_id, Some(user_id));

    Ok(())
}

/// Expect the email to match regardless of case
#[tokio::test]
async fn login_ignores_email_case() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;
    register_user(&test, "alice").await?;

    let mut dto = login_dto("alice", constant::TEST_PASSWORD);
    dto.email = dto.email.to_uppercase();

    let result = login(State(test.state()), test.session.clone(), ApiJson(dto)).await;

    assert_eq!(result.into_response().status(), StatusCode::OK);

    Ok(())
}

/// Expect 400 for a wrong password and an anonymous session afterwards
#[tokio::test]
async fn login_rejects_wrong_password() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;
    register_user(&test, "alice").await?;

    let result = login(
        State(test.state()),
        test.session.clone(),
        ApiJson(login_dto("alice", "not-the-password")),
    )
    .await;

    assert!(result.is_err());
    assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 400 for an email nobody registered with
#[tokio::test]
async fn login_rejects_unknown_email() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;

    let result = login(
        State(test.state()),
        test.session.clone(),
        ApiJson(login_dto("nobody", constant::TEST_PASSWORD)),
    )
    .await;

    assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);

    Ok(())
}

/// Expect 204 and an anonymous session after logging out
#[tokio::test]
async fn logout_clears_session() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_recipe_tables()
        .with_user("alice")
        .build()
        .await?;
    log_in(&test.session, 1).await;

    let result = logout(State(test.state()), test.session.clone()).await;

    assert!(result.is_ok());
    assert_eq!(result.into_response().status(), StatusCode::NO_CONTENT);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

/// Expect 401 when logging out without being logged in
#[tokio::test]
async fn logout_requires_session() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;

    let result = logout(State(test.state()), test.session.clone()).await;

    assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

/// Expect 401 and a cleared session when the session user no longer exists
#[tokio::test]
async fn logout_rejects_session_of_deleted_user() -> Result<(), TestError> {
    let test = TestBuilder::new().with_recipe_tables().build().await?;
    log_in(&test.session, 42).await;

    let result = logout(State(test.state()), test.session.clone()).await;

    assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}
