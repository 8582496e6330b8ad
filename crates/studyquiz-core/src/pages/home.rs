//! Landing page.

use super::Route;

/// A feature blurb on the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub title: &'static str,
    pub description: &'static str,
}

/// Static landing content with links to signup and login.
#[derive(Debug, Default, Clone, Copy)]
pub struct HomePage;

impl HomePage {
    pub const TITLE: &'static str = "Practice & Self-Evaluation Platform";
    pub const TAGLINE: &'static str = "Upload your study materials and generate AI-powered quizzes tailored to your learning needs";

    pub const FEATURES: [Feature; 3] = [
        Feature {
            title: "Upload Documents",
            description: "Upload PDFs and presentations to extract content",
        },
        Feature {
            title: "Customize Rules",
            description: "Set difficulty, topics, and question types",
        },
        Feature {
            title: "Take Quizzes",
            description: "Practice with AI-generated questions and track progress",
        },
    ];

    /// Call-to-action links, primary first.
    pub fn links(&self) -> [(&'static str, Route); 2] {
        [("Get Started", Route::Signup), ("Sign In", Route::Login)]
    }
}
