//! # Session
//!
//! Who is logged in, as last reported by the auth endpoints.
//!
//! The session is an explicit context object: the storefront creates one and
//! hands clones to whatever needs it. [`Session::init`] asks the server for the
//! current user, [`Session::login`] establishes a session and re-reads the
//! user, and [`Session::logout`] clears it. The credential itself is a cookie
//! held by the HTTP client and is never seen here.

use crate::api::{ApiError, MenuApi};
use crate::model::{CurrentUser, LoginRequest};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("login rejected: {0}")]
    Login(#[source] ApiError),

    #[error("logout failed: {0}")]
    Logout(#[source] ApiError),

    /// Login succeeded but the server still reports no user.
    #[error("no session after login")]
    NotEstablished,
}

impl SessionError {
    /// The message to show on the auth page.
    pub fn user_message(&self) -> String {
        match self {
            SessionError::Login(e) => e.user_message("Login failed."),
            SessionError::Logout(e) => e.user_message("Logout failed."),
            SessionError::NotEstablished => "Login failed.".to_string(),
        }
    }
}

#[derive(Clone)]
pub struct Session {
    api: Arc<dyn MenuApi>,
    user: Arc<RwLock<Option<CurrentUser>>>,
}

impl Session {
    /// An empty session; call [`init`](Self::init) to pick up an existing one.
    pub fn new(api: Arc<dyn MenuApi>) -> Self {
        Self {
            api,
            user: Arc::new(RwLock::new(None)),
        }
    }

    /// Asks the server who is logged in. Any failure counts as nobody.
    #[instrument(skip(self))]
    pub async fn init(&self) -> Option<CurrentUser> {
        let user = match self.api.current_user().await {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Could not read current user");
                None
            }
        };
        *self.user.write().await = user.clone();
        user
    }

    pub async fn current(&self) -> Option<CurrentUser> {
        self.user.read().await.clone()
    }

    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> Result<CurrentUser, SessionError> {
        let request = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.api.login(&request).await.map_err(SessionError::Login)?;

        let user = self
            .api
            .current_user()
            .await
            .map_err(SessionError::Login)?
            .ok_or(SessionError::NotEstablished)?;
        info!(user = %user.username, "Logged in");
        *self.user.write().await = Some(user.clone());
        Ok(user)
    }

    /// Ends the session. On failure the current user is kept.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<(), SessionError> {
        self.api.logout().await.map_err(SessionError::Logout)?;
        *self.user.write().await = None;
        info!("Logged out");
        Ok(())
    }
}
