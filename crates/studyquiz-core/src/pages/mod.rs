//! Page state machines.
//!
//! Each page mounts or reacts to a user action by awaiting one or two
//! [`QuizApi`](crate::QuizApi) calls, keeps a loading / error / ready state for
//! rendering, and returns the [`Route`] to navigate to when it is done.

pub mod auth;
pub mod dashboard;
pub mod generate;
pub mod home;
pub mod quiz;
pub mod results;
pub mod ruleset;
pub mod upload;

use std::fmt;

pub use auth::{LoginPage, SignupPage};
pub use dashboard::{DashboardPage, DashboardView, NavCard, NAV_CARDS};
pub use generate::GeneratePage;
pub use home::HomePage;
pub use quiz::{QuizPage, QuizSession};
pub use results::ResultsPage;
pub use ruleset::RulesetForm;
pub use upload::UploadPage;

/// What a page currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Loading,
    Error(String),
    Ready(T),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            PageState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn ready_mut(&mut self) -> Option<&mut T> {
        match self {
            PageState::Ready(value) => Some(value),
            _ => None,
        }
    }
}

/// Navigation targets.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Signup,
    Login,
    Dashboard,
    Upload,
    CreateRuleset,
    GenerateQuiz,
    TakeQuiz(String),
    Results(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Signup => "/auth/signup".to_string(),
            Route::Login => "/auth/login".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::CreateRuleset => "/rulesets/create".to_string(),
            Route::GenerateQuiz => "/quizzes/generate".to_string(),
            Route::TakeQuiz(id) => format!("/quizzes/{id}/start"),
            Route::Results(id) => format!("/quizzes/{id}/results"),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// The inline message for a failed action, or `fallback` when the error
/// carries no text.
pub(crate) fn error_text(err: &anyhow::Error, fallback: &str) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}
