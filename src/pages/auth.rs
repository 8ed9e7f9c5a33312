//! # Auth Page
//!
//! Login form when nobody is logged in, a logout button otherwise, and one
//! status line for the outcome of the last action.

use crate::model::CurrentUser;
use crate::session::Session;

pub struct AuthPage {
    session: Session,
    user: Option<CurrentUser>,
    message: Option<String>,
    pub username: String,
    pub password: String,
}

impl AuthPage {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            user: None,
            message: None,
            username: String::new(),
            password: String::new(),
        }
    }

    /// Asks the server who is logged in.
    pub async fn load(&mut self) {
        self.user = self.session.init().await;
    }

    pub fn user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Logs in with the form fields, clearing them on success.
    pub async fn login(&mut self) {
        self.message = None;
        match self.session.login(&self.username, &self.password).await {
            Ok(user) => {
                self.user = Some(user);
                self.username.clear();
                self.password.clear();
                self.message = Some("Logged in!".to_string());
            }
            Err(e) => self.message = Some(e.user_message()),
        }
    }

    pub async fn logout(&mut self) {
        self.message = None;
        match self.session.logout().await {
            Ok(()) => {
                self.user = None;
                self.message = Some("Logged out.".to_string());
            }
            Err(e) => self.message = Some(e.user_message()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockMenuApi;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_login_clears_form_and_reports() {
        let api = Arc::new(MockMenuApi::new());
        api.current_user.push_ok(None).push_ok(Some(CurrentUser {
            username: "mara".into(),
        }));
        api.login.push_ok(());

        let mut page = AuthPage::new(Session::new(api));
        page.load().await;
        assert!(page.user().is_none());

        page.username = "mara".into();
        page.password = "hunter2".into();
        page.login().await;

        assert_eq!(page.message(), Some("Logged in!"));
        assert_eq!(page.user().map(|u| u.username.as_str()), Some("mara"));
        assert!(page.username.is_empty() && page.password.is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_shows_server_message_and_keeps_form() {
        let api = Arc::new(MockMenuApi::new());
        api.current_user.push_ok(None);
        api.login.push_err(401, "Invalid credentials");

        let mut page = AuthPage::new(Session::new(api));
        page.load().await;
        page.username = "mara".into();
        page.password = "nope".into();
        page.login().await;

        assert_eq!(page.message(), Some("Invalid credentials"));
        assert!(page.user().is_none());
        assert_eq!(page.username, "mara");
    }

    #[tokio::test]
    async fn test_logout_reports() {
        let api = Arc::new(MockMenuApi::new());
        api.current_user.push_ok(Some(CurrentUser {
            username: "mara".into(),
        }));
        api.logout.push_ok(());

        let mut page = AuthPage::new(Session::new(api));
        page.load().await;
        assert!(page.user().is_some());

        page.logout().await;
        assert_eq!(page.message(), Some("Logged out."));
        assert!(page.user().is_none());
    }
}
