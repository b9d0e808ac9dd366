use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use foodgram::{
    model::{
        api::PaginationQuery,
        user::{RecipesLimitQuery, RegisterUserDto, SetPasswordDto, SubscriptionListQuery},
    },
    server::{
        controller::{
            user::{
                get_me, get_user, list_subscriptions, list_users, register, set_password,
                subscribe, unsubscribe,
            },
            util::extract::{ApiJson, ApiPath, ApiQuery},
        },
        model::app::AppState,
        service::auth::AuthService,
    },
};

use super::*;

fn registration(username: &str) -> Result<RegisterUserDto, TestError> {
    Ok(serde_json::from_value(factory::register_payload(
        username,
        constant::TEST_PASSWORD,
    ))?)
}

mod register {
    use super::*;

    /// Expect 201 with the created account and no password in the body
    #[tokio::test]
    async fn creates_user() -> Result<(), TestError> {
        let test = TestBuilder::new().with_recipe_tables().build().await?;

        let result = register(State(test.state()), ApiJson(registration("alice")?)).await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(body["email"], "alice@example.com");
        assert_eq!(body["username"], "alice");
        assert!(body.get("password").is_none());

        Ok(())
    }

    /// Expect 400 when the email is already registered
    #[tokio::test]
    async fn rejects_taken_email() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_user("alice")
            .build()
            .await?;

        let mut payload = registration("alice2")?;
        payload.email = "alice@example.com".to_string();

        let result = register(State(test.state()), ApiJson(payload)).await;

        assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod profile {
    use super::*;

    /// Expect 404 for a user that does not exist
    #[tokio::test]
    async fn returns_not_found_for_unknown_user() -> Result<(), TestError> {
        let test = TestBuilder::new().with_recipe_tables().build().await?;

        let result = get_user(State(test.state()), test.session.clone(), ApiPath(7)).await;

        assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    /// Expect is_subscribed to reflect the viewer's subscriptions
    #[tokio::test]
    async fn reports_subscription_of_viewer() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_recipe_tables()
            .with_user("alice")
            .with_user("bob")
            .build()
            .await?;
        test.user().insert_subscription(1, 2).await?;
        log_in(&test.session, 1).await;

        let result = get_user(State(test.state()), test.session.clone(), ApiPath(2)).await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["is_subscribed"], true);

        Ok(())
    }

    /// Expect 401 for the own profile of an anonymous viewer
    #[tokio::test]
    async fn me_requires_session() -> Result<(), TestError> {
        let test = TestBuilder::new().with_recipe_tables().build().await?;

        let result = get_me(State(test.state()), test.session.clone()).await;

        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    /// Expect the own profile of a logged in user
    #[tokio::test]
    async fn me_returns_own_profile() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_user("alice")
            .build()
            .await?;
        log_in(&test.session, 1).await;

        let result = get_me(State(test.state()), test.session.clone()).await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_json(resp).await["username"], "alice");

        Ok(())
    }
}

mod listing {
    use super::*;

    /// Expect a page of users with a link to the next page
    #[tokio::test]
    async fn paginates_users() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_user("alice")
            .with_user("bob")
            .with_user("carol")
            .build()
            .await?;

        let uri: Uri = "/api/users/?limit=2".parse().unwrap();
        let query = PaginationQuery {
            page: None,
            limit: Some(2),
        };

        let result = list_users(
            State(test.state()),
            test.session.clone(),
            uri,
            ApiQuery(query),
        )
        .await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["count"], 3);
        assert_eq!(body["results"].as_array().unwrap().len(), 2);
        assert_eq!(body["next"], "/api/users/?limit=2&page=2");
        assert!(body["previous"].is_null());

        Ok(())
    }

    /// Expect 404 for a page past the last one
    #[tokio::test]
    async fn rejects_page_past_the_end() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_recipe_tables()
            .with_user("alice")
            .build()
            .await?;

        let query = PaginationQuery {
            page: Some(3),
            limit: None,
        };

        let result = list_users(
            State(test.state()),
            test.session.clone(),
            "/api/users/?page=3".parse().unwrap(),
            ApiQuery(query),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod password {
    use super::*;

    /// Expect 204 and the new password to be accepted at login
    #[tokio::test]
    async fn changes_password() -> Result<(), TestError> {
        let test = TestBuilder::new().with_recipe_tables().build().await?;
        let user_id = register_user(&test, "alice").await?;
        log_in(&test.session, user_id).await;

        let payload = SetPasswordDto {
            new_password: "a-brand-new-password".to_string(),
            current_password: constant::TEST_PASSWORD.to_string(),
        };

        let result =
            set_password(State(test.state()), test.session.clone(), ApiJson(payload)).await;

        assert_eq!(result.into_response().status(), StatusCode::NO_CONTENT);

        let login = AuthService::new(&test.state.db)
            .login("alice@example.com", "a-brand-new-password")
            .await;
        assert!(login.is_ok());

        Ok(())
    }

    /// Expect 400 when the current password is wrong
    #[tokio::test]
    async fn rejects_wrong_current_password() -> Result<(), TestError> {
        let test = TestBuilder::new().with_recipe_tables().build().await?;
        let user_id = register_user(&test, "alice").await?;
        log_in(&test.session, user_id).await;

        let payload = SetPasswordDto {
            new_password: "a-brand-new-password".to_string(),
            current_password: "wrong".to_string(),
        };

        let result =
            set_password(State(test.state()), test.session.clone(), ApiJson(payload)).await;

        assert_eq!(result.into_response().status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod subscriptions {
    use super::*;

    async fn setup() -> Result<TestSetup, TestError> {
        let mut test = TestBuilder::new()
            .with_recipe_tables()
            .with_user("alice")
            .with_user("bob")
            .build()
            .await?;
        test.recipe().insert_recipe(2, "Soup").await?;
        test.recipe().insert_recipe(2, "Stew").await?;
        log_in(&test.session, 1).await;

        Ok(test)
    }

    /// Expect 201 with the author and their limited recipes, then 400 on a repeat
    #[tokio::test]
    async fn subscribes_once() -> Result<(), TestError> {
        let test = setup().await?;

        let result = subscribe(
            State(test.state()),
            test.session.clone(),
            ApiPath(2),
            ApiQuery(RecipesLimitQuery {
                recipes_limit: Some(1),
            }),
        )
        .await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body = body_json(resp).await;
        assert_eq!(body["id"], 2);
        assert_eq!(body["is_subscribed"], true);
        assert_eq!(body["recipes_count"], 2);
        assert_eq!(body["recipes"].as_array().unwrap().len(), 1);

        let repeat = subscribe(
            State(test.state()),
            test.session.clone(),
            ApiPath(2),
            ApiQuery(RecipesLimitQuery::default()),
        )
        .await;

        assert_eq!(repeat.into_response().status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 400 when subscribing to yourself
    #[tokio::test]
    async fn rejects_self_subscription() -> Result<(), TestError> {
        let test = setup().await?;

        let result = subscribe(
            State(test.state()),
            test.session.clone(),
            ApiPath(1),
            ApiQuery(RecipesLimitQuery::default()),
        )
        .await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(resp).await["error"],
            "You cannot subscribe to yourself"
        );

        Ok(())
    }

    /// Expect 404 when subscribing to an unknown author
    #[tokio::test]
    async fn rejects_unknown_author() -> Result<(), TestError> {
        let test = setup().await?;

        let result = subscribe(
            State(test.state()),
            test.session.clone(),
            ApiPath(99),
            ApiQuery(RecipesLimitQuery::default()),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    /// Expect 204 on unsubscribe, then 400 on a repeat
    #[tokio::test]
    async fn unsubscribes_once() -> Result<(), TestError> {
        let mut test = setup().await?;
        test.user().insert_subscription(1, 2).await?;

        let result = unsubscribe(State(test.state()), test.session.clone(), ApiPath(2)).await;
        assert_eq!(result.into_response().status(), StatusCode::NO_CONTENT);

        let repeat = unsubscribe(State(test.state()), test.session.clone(), ApiPath(2)).await;
        assert_eq!(repeat.into_response().status(), StatusCode::BAD_REQUEST);

        Ok(())
    }

    /// Expect 401 for anonymous subscriptions
    #[tokio::test]
    async fn requires_session() -> Result<(), TestError> {
        let test = setup().await?;
        let anonymous = test.new_session();

        let result = subscribe(
            State(test.state()),
            anonymous,
            ApiPath(2),
            ApiQuery(RecipesLimitQuery::default()),
        )
        .await;

        assert_eq!(result.into_response().status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    /// Expect followed authors with their recipes limited per author
    #[tokio::test]
    async fn lists_followed_authors() -> Result<(), TestError> {
        let mut test = setup().await?;
        test.user().insert_subscription(1, 2).await?;

        let query = SubscriptionListQuery {
            page: None,
            limit: None,
            recipes_limit: Some(1),
        };

        let result = list_subscriptions(
            State(test.state::<AppState>()),
            test.session.clone(),
            "/api/users/subscriptions/?recipes_limit=1".parse().unwrap(),
            ApiQuery(query),
        )
        .await;

        let resp = result.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["results"][0]["username"], "bob");
        assert_eq!(body["results"][0]["recipes"].as_array().unwrap().len(), 1);
        assert_eq!(body["results"][0]["recipes_count"], 2);

        Ok(())
    }
}
