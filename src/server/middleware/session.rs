//! Session wrapper for the OAuth login flow.
//!
//! Sessions only hold the CSRF state between the redirect to the identity provider and
//! the callback; API authentication uses bearer tokens.

use tower_sessions::Session;

use crate::server::error::AppError;

const SESSION_OAUTH_CSRF_TOKEN: &str = "oauth:csrf_token";

pub struct CsrfSession<'a> {
    session: &'a Session,
}

impl<'a> CsrfSession<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Stores the CSRF state sent to the identity provider.
    pub async fn set_token(&self, token: String) -> Result<(), AppError> {
        self.session.insert(SESSION_OAUTH_CSRF_TOKEN, token).await?;
        Ok(())
    }

    /// Removes and returns the stored CSRF state so each state is accepted once.
    ///
    /// # Returns
    /// - `Ok(Some(token))` - State found and removed
    /// - `Ok(None)` - No login in progress for this session
    /// - `Err(AppError::SessionErr(_))` - Session store failure
    pub async fn take_token(&self) -> Result<Option<String>, AppError> {
        let token = self.session.remove(SESSION_OAUTH_CSRF_TOKEN).await?;
        Ok(token)
    }
}
