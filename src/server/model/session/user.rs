use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_USER_ID_KEY: &str = "foodgram:user:id";

/// ID of the logged in user, stored as a string under [`SESSION_USER_ID_KEY`]
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub String);

impl SessionUserId {
    /// Store the user ID, marking the session as authenticated
    pub async fn insert(session: &Session, user_id: i32) -> Result<(), Error> {
        // Rotate the session ID on login so a pre-login cookie cannot be reused
        session.cycle_id().await?;
        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
            .await?;

        Ok(())
    }

    /// Get the logged in user ID, `None` for anonymous sessions
    pub async fn get(session: &Session) -> Result<Option<i32>, Error> {
        let Some(SessionUserId(raw)) = session.get::<SessionUserId>(SESSION_USER_ID_KEY).await?
        else {
            return Ok(None);
        };

        raw.parse::<i32>()
            .map(Some)
            .map_err(|e| Error::ParseError(format!("Failed to parse session user id: {}", e)))
    }

    /// Drop every value from the session and delete it from the store
    pub async fn clear(session: &Session) -> Result<(), Error> {
        session.flush().await?;

        Ok(())
    }
}
