//! Results view.

use crate::model::QuizResults;
use crate::traits::QuizApi;

use super::{error_text, PageState};

/// Finishes the quiz on mount and shows the returned score.
#[derive(Debug, Clone)]
pub struct ResultsPage {
    quiz_id: String,
    state: PageState<QuizResults>,
}

impl ResultsPage {
    pub fn new(quiz_id: impl Into<String>) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            state: PageState::Loading,
        }
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn state(&self) -> &PageState<QuizResults> {
        &self.state
    }

    pub async fn mount(&mut self, api: &dyn QuizApi) {
        self.state = match api.finish_quiz(&self.quiz_id).await {
            Ok(results) => {
                tracing::info!(
                    quiz_id = %self.quiz_id,
                    score = results.score,
                    "quiz finished"
                );
                PageState::Ready(results)
            }
            Err(e) => PageState::Error(error_text(&e, "Failed to load results")),
        };
    }
}
