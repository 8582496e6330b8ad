//! Dashboard: the signed-in user's files and the main navigation.

use anyhow::Result;

use crate::model::{FileRecord, User};
use crate::traits::QuizApi;

use super::{PageState, Route};

/// A navigation card on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavCard {
    pub title: &'static str,
    pub description: &'static str,
    pub route: Route,
}

pub const NAV_CARDS: [NavCard; 3] = [
    NavCard {
        title: "Upload Files",
        description: "Upload PDFs and presentations",
        route: Route::Upload,
    },
    NavCard {
        title: "Create Ruleset",
        description: "Configure quiz generation rules",
        route: Route::CreateRuleset,
    },
    NavCard {
        title: "Generate Quiz",
        description: "Create AI-powered quizzes",
        route: Route::GenerateQuiz,
    },
];

/// Data shown once the dashboard has loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub user: User,
    pub files: Vec<FileRecord>,
}

impl DashboardView {
    pub fn greeting(&self) -> String {
        format!("Welcome back, {}", self.user.display_name())
    }
}

#[derive(Debug, Clone)]
pub struct DashboardPage {
    state: PageState<DashboardView>,
}

impl Default for DashboardPage {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardPage {
    pub fn new() -> Self {
        Self {
            state: PageState::Loading,
        }
    }

    pub fn state(&self) -> &PageState<DashboardView> {
        &self.state
    }

    /// Fetch the user and their files together. Any failure redirects to
    /// the login page.
    pub async fn mount(&mut self, api: &dyn QuizApi) -> Option<Route> {
        self.state = PageState::Loading;
        match futures::try_join!(api.current_user(), api.list_files()) {
            Ok((user, files)) => {
                self.state = PageState::Ready(DashboardView { user, files });
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "dashboard load failed, redirecting to login");
                self.state = PageState::Error(e.to_string());
                Some(Route::Login)
            }
        }
    }

    pub fn logout(&mut self, api: &dyn QuizApi) -> Result<Route> {
        api.logout()?;
        self.state = PageState::Loading;
        Ok(Route::Home)
    }
}
