use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request},
    response::Response,
    Router,
};
use foodgram::server::{model::app::AppState, router};
use foodgram_test_utils::prelude::*;
use serde_json::Value;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

/// The application router backed by the test database and an in-memory session store
pub struct TestApp {
    router: Router,
}

impl TestApp {
    pub fn new(test: &TestSetup) -> Self {
        let router = router::routes()
            .with_state(test.state::<AppState>())
            .layer(SessionManagerLayer::new(MemoryStore::default()).with_secure(false));

        Self { router }
    }

    pub async fn send(&self, request: Request<Body>) -> Response {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Send a request with an optional JSON body and session cookie
    pub async fn json(
        &self,
        method: Method,
        uri: &str,
        cookie: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => builder.body(Body::empty()),
        }
        .unwrap();

        self.send(request).await
    }

    /// Register a user over HTTP and log in, returning the session cookie
    pub async fn register_and_log_in(&self, username: &str) -> String {
        let response = self
            .json(
                Method::POST,
                "/api/users/",
                None,
                Some(factory::register_payload(username, constant::TEST_PASSWORD)),
            )
            .await;
        assert_eq!(response.status(), 201);

        let response = self
            .json(
                Method::POST,
                "/api/auth/token/login/",
                None,
                Some(serde_json::json!({
                    "email": format!("{}@example.com", username),
                    "password": constant::TEST_PASSWORD,
                })),
            )
            .await;
        assert_eq!(response.status(), 200);

        session_cookie(&response)
    }
}

/// The `name=value` pair of the session cookie set by `response`
pub fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the session cookie")
        .to_str()
        .unwrap();

    set_cookie.split(';').next().unwrap().to_string()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
