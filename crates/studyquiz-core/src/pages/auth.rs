//! Signup and login forms.

use crate::traits::QuizApi;

use super::{error_text, Route};

/// Login form. A successful login stores the token and opens the dashboard.
#[derive(Debug, Clone, Default)]
pub struct LoginPage {
    pub email: String,
    pub password: String,
    submitting: bool,
    error: Option<String>,
}

impl LoginPage {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn submit(&mut self, api: &dyn QuizApi) -> Option<Route> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required".to_string());
            return None;
        }

        self.submitting = true;
        self.error = None;
        let outcome = api.login(self.email.trim(), &self.password).await;
        self.submitting = false;

        match outcome {
            Ok(_) => {
                tracing::info!(email = %self.email.trim(), "logged in");
                Some(Route::Dashboard)
            }
            Err(e) => {
                self.error = Some(error_text(&e, "Login failed"));
                None
            }
        }
    }
}

/// Signup form. A successful signup sends the user to the login page.
#[derive(Debug, Clone, Default)]
pub struct SignupPage {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
    submitting: bool,
    error: Option<String>,
}

impl SignupPage {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        full_name: Option<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            full_name,
            ..Self::default()
        }
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub async fn submit(&mut self, api: &dyn QuizApi) -> Option<Route> {
        if self.email.trim().is_empty() || self.password.is_empty() {
            self.error = Some("Email and password are required".to_string());
            return None;
        }

        self.submitting = true;
        self.error = None;
        let full_name = self
            .full_name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty());
        let outcome = api.signup(self.email.trim(), &self.password, full_name).await;
        self.submitting = false;

        match outcome {
            Ok(_) => Some(Route::Login),
            Err(e) => {
                self.error = Some(error_text(&e, "Signup failed"));
                None
            }
        }
    }
}
