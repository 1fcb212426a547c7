//! Admin login page.
//!
//! A successful login stores the token in the session and asks to move to
//! `/admin`. Anything else leaves the session anonymous and keeps the admin
//! on this page with a message.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use super::FormStatus;
use crate::net::api::LoginOutcome;
use crate::net::http::ApiClient;
use crate::net::types::Credentials;
use crate::state::session::SessionState;
use crate::util::guard::Route;
use crate::util::validate::FieldErrors;

pub const INVALID_MESSAGE: &str = "Invalid credentials";
pub const FAILURE_MESSAGE: &str = "Login failed. Please check your email or password.";
pub const SUCCESS_MESSAGE: &str = "Signed in.";

/// Where an already signed-in admin should land instead of this page.
pub fn redirect_on_enter(state: SessionState) -> Option<Route> {
    (state == SessionState::Authenticated).then_some(Route::Admin)
}

#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub errors: FieldErrors,
    pub status: FormStatus,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("errors", &self.errors)
            .field("status", &self.status)
            .finish_non_exhaustive()
    }
}

impl LoginForm {
    /// # Errors
    ///
    /// Returns the failing fields when email or password is blank.
    pub fn validate(&self) -> Result<Credentials, FieldErrors> {
        let mut errors = FieldErrors::new();
        let email = errors.require("email", &self.email, "Email is required.");
        if self.password.is_empty() {
            errors.add("password", "Password is required.");
        }
        errors.into_result(Credentials { email, password: self.password.clone() })
    }

    /// Attempt a login. Returns the route to show next when it succeeds.
    pub async fn submit(&mut self, client: &ApiClient) -> Option<Route> {
        let credentials = match self.validate() {
            Ok(credentials) => credentials,
            Err(errors) => {
                self.errors = errors;
                self.status = FormStatus::Invalid;
                return None;
            }
        };
        self.errors = FieldErrors::new();
        self.status = FormStatus::Submitting;

        let result = client.auth().login(&credentials).await;
        self.password.clear();
        match result {
            Ok(LoginOutcome::Authenticated) => {
                self.status = FormStatus::Succeeded(SUCCESS_MESSAGE.to_owned());
                Some(Route::Admin)
            }
            Ok(LoginOutcome::Rejected(_)) => {
                self.status = FormStatus::Failed(INVALID_MESSAGE.to_owned());
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "login request failed");
                self.status = FormStatus::Failed(e.user_message(FAILURE_MESSAGE));
                None
            }
        }
    }
}
