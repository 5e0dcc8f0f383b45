//! Session-held login state.
//!
//! The only thing kept in the session is the username of the logged-in user.
//! Its presence is what separates the logged-in state from the logged-out one.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::error::Result;

pub const SESSION_USERNAME_KEY: &str = "username";

#[derive(Default, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct SessionUser(pub String);

impl SessionUser {
    /// Mark the session as logged in as `username`
    pub async fn insert(session: &Session, username: &str) -> Result<()> {
        // Fresh id on login
        session.cycle_id().await?;
        session
            .insert(SESSION_USERNAME_KEY, SessionUser(username.to_string()))
            .await?;

        Ok(())
    }

    /// Get the logged-in username, if any
    pub async fn get(session: &Session) -> Result<Option<String>> {
        Ok(session
            .get::<SessionUser>(SESSION_USERNAME_KEY)
            .await?
            .map(|SessionUser(username)| username))
    }

    /// Log out. Removing an absent key is fine.
    pub async fn remove(session: &Session) -> Result<()> {
        session.remove::<SessionUser>(SESSION_USERNAME_KEY).await?;

        Ok(())
    }
}
