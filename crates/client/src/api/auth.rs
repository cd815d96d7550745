//! Login, logout and the current user.

use chrono::Utc;
use pasok_core::domain::User;
use pasok_core::validation::{LoginInput, validate_input};
use serde::Deserialize;
use tracing::{info, warn};

use crate::client::{ApiClient, AuthMode};
use crate::error::ClientResult;
use crate::session::StoredSession;

#[derive(Debug, Deserialize)]
struct LoginPayload {
    token: String,
    user: User,
}

impl ApiClient {
    /// Logs in and stores the session.
    pub async fn login(&self, input: &LoginInput) -> ClientResult<StoredSession> {
        validate_input(input)?;
        let payload: LoginPayload = self
            .post_as("auth/login", input, AuthMode::Anonymous)
            .await?;

        let session = StoredSession {
            token: payload.token,
            user: payload.user,
            saved_at: Utc::now(),
        };
        self.session().save(&session)?;
        info!(username = %session.user.username, role = %session.user.role, "logged in");
        Ok(session)
    }

    /// Logs out. The local session is removed even if the server call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        if self.session().token()?.is_some() {
            if let Err(err) = self.post_empty("auth/logout").await {
                warn!(error = %err, "server logout failed");
            }
        }
        self.session().clear()?;
        Ok(())
    }

    /// Returns the user the stored token belongs to.
    pub async fn me(&self) -> ClientResult<User> {
        self.get("auth/me", &[]).await
    }
}
