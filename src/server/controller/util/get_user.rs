use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{auth::AuthError, Error},
    model::{app::AppState, db::UserModel, session::user::SessionUserId},
};

/// Retrieves the logged in user from session and then from database
///
/// # Arguments
/// - `state`: Application state with the database connection
/// - `session`: The user's session
///
/// # Returns
/// - `Ok(UserModel)` - User found
/// - `Err(Error::AuthError(AuthError::UserNotInSession))` - User ID not present in session
/// - `Err(Error::AuthError(AuthError::UserNotInDatabase))` - User ID exists in session but not
///   found in database (session is cleared)
/// - `Err(Error)` - Internal errors (database query failures, session errors, etc.)
pub async fn get_user_from_session(
    state: &AppState,
    session: &Session,
) -> Result<UserModel, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Err(Error::AuthError(AuthError::UserNotInSession));
    };

    let Some(user) = UserRepository::new(&state.db).get(user_id).await? else {
        SessionUserId::clear(session).await?;

        tracing::debug!(
            "Session cleared for user ID {} with active session but was not found in database",
            user_id
        );

        return Err(Error::AuthError(AuthError::UserNotInDatabase(user_id)));
    };

    Ok(user)
}

/// ID of the user viewing a public endpoint, `None` for anonymous requests
///
/// Sessions pointing at a deleted user are treated as anonymous.
pub async fn get_viewer_id(state: &AppState, session: &Session) -> Result<Option<i32>, Error> {
    match get_user_from_session(state, session).await {
        Ok(user) => Ok(Some(user.id)),
        Err(Error::AuthError(AuthError::UserNotInSession | AuthError::UserNotInDatabase(_))) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}
