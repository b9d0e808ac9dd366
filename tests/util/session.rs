use foodgram::{
    model::user::RegisterUserDto,
    server::{model::session::user::SessionUserId, service::user::UserService},
};
use foodgram_test_utils::prelude::*;
use tower_sessions::Session;

/// Register a user through the registration flow so they can log in with
/// [`constant::TEST_PASSWORD`], returning the new user ID
pub async fn register_user(test: &TestSetup, username: &str) -> Result<i32, TestError> {
    let payload: RegisterUserDto =
        serde_json::from_value(factory::register_payload(username, constant::TEST_PASSWORD))?;

    let user = UserService::new(&test.state.db)
        .register(payload)
        .await
        .unwrap();

    Ok(user.id)
}

/// Mark `session` as logged in as `user_id`
pub async fn log_in(session: &Session, user_id: i32) {
    SessionUserId::insert(session, user_id).await.unwrap();
}
