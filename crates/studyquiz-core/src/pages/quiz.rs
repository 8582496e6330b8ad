//! Quiz-taking flow: one question at a time, each answer submitted before
//! moving on.

use anyhow::Result;

use crate::model::{AnswerSubmission, Question, Quiz};
use crate::storage::{stashed_questions, KeyValueStore};
use crate::traits::QuizApi;

use super::{error_text, PageState, Route};

pub const NO_QUESTIONS: &str = "No questions found for this quiz";

/// An in-progress quiz.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizSession {
    quiz: Quiz,
    questions: Vec<Question>,
    index: usize,
    selected: Option<String>,
    error: Option<String>,
    finished: bool,
}

impl QuizSession {
    pub fn new(quiz: Quiz, questions: Vec<Question>) -> Self {
        Self {
            quiz,
            questions,
            index: 0,
            selected: None,
            error: None,
            finished: false,
        }
    }

    pub fn quiz(&self) -> &Quiz {
        &self.quiz
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz.quiz_id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Zero-based index of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// "Question n of m".
    pub fn position_label(&self) -> String {
        format!("Question {} of {}", self.index + 1, self.questions.len())
    }

    /// Share of the quiz reached, counting the current question.
    pub fn progress_percent(&self) -> f64 {
        if self.questions.is_empty() {
            return 0.0;
        }
        (self.index + 1) as f64 / self.questions.len() as f64 * 100.0
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Pick an answer for the current question. Only its options are taken.
    pub fn select(&mut self, answer: &str) -> bool {
        match self.current() {
            Some(question) if question.has_option(answer) => {
                self.selected = Some(answer.to_string());
                true
            }
            _ => false,
        }
    }

    /// Submit the selected answer. Advances on success; after the last
    /// question returns the results route. Without a selection nothing
    /// happens.
    pub async fn submit(&mut self, api: &dyn QuizApi) -> Option<Route> {
        if self.finished {
            return Some(Route::Results(self.quiz.quiz_id.clone()));
        }
        let (Some(answer), Some(question)) = (self.selected.clone(), self.current()) else {
            return None;
        };

        let submission = AnswerSubmission {
            question_id: question.id.clone(),
            selected_answer: answer,
        };

        match api.submit_answer(&self.quiz.quiz_id, &submission).await {
            Ok(_) => {
                self.error = None;
                if self.is_last() {
                    self.finished = true;
                    Some(Route::Results(self.quiz.quiz_id.clone()))
                } else {
                    self.index += 1;
                    self.selected = None;
                    None
                }
            }
            Err(e) => {
                tracing::warn!(
                    quiz_id = %self.quiz.quiz_id,
                    question_id = %submission.question_id,
                    error = %e,
                    "answer submission failed"
                );
                self.error = Some(error_text(&e, "Failed to submit answer"));
                None
            }
        }
    }
}

/// Starts a quiz on mount and hosts its [`QuizSession`].
#[derive(Debug, Clone)]
pub struct QuizPage {
    quiz_id: String,
    state: PageState<QuizSession>,
}

impl QuizPage {
    pub fn new(quiz_id: impl Into<String>) -> Self {
        Self {
            quiz_id: quiz_id.into(),
            state: PageState::Loading,
        }
    }

    pub fn quiz_id(&self) -> &str {
        &self.quiz_id
    }

    pub fn state(&self) -> &PageState<QuizSession> {
        &self.state
    }

    pub fn session_mut(&mut self) -> Option<&mut QuizSession> {
        self.state.ready_mut()
    }

    /// Start the quiz on the service and load its questions.
    ///
    /// Questions returned by the start call win; otherwise the list stashed
    /// by the generation page is used.
    pub async fn mount(&mut self, api: &dyn QuizApi, store: &dyn KeyValueStore) {
        self.state = match self.start(api, store).await {
            Ok(session) => PageState::Ready(session),
            Err(e) => {
                tracing::warn!(quiz_id = %self.quiz_id, error = %e, "failed to start quiz");
                PageState::Error(error_text(&e, "Failed to start quiz"))
            }
        };
    }

    async fn start(&self, api: &dyn QuizApi, store: &dyn KeyValueStore) -> Result<QuizSession> {
        let mut quiz = api.start_quiz(&self.quiz_id).await?;

        let questions = match quiz.questions.take() {
            Some(questions) if !questions.is_empty() => questions,
            _ => stashed_questions(store, &self.quiz_id)?.unwrap_or_default(),
        };
        anyhow::ensure!(!questions.is_empty(), NO_QUESTIONS);

        tracing::debug!(quiz_id = %self.quiz_id, questions = questions.len(), "quiz started");
        Ok(QuizSession::new(quiz, questions))
    }
}
