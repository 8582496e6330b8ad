//! Quiz generation: pick a processed document and a ruleset.

use anyhow::Result;

use crate::model::{FileRecord, Question, Quiz, Ruleset};
use crate::storage::{stash_questions, KeyValueStore};
use crate::traits::{CreateQuizRequest, GenerateRequest, QuizApi};

use super::{error_text, Route};

pub const LOAD_FAILED: &str = "Failed to load data";
pub const SELECTION_REQUIRED: &str = "Please select both a file and a ruleset";

/// Lists completed files and rulesets; turns a selection into a new quiz.
#[derive(Debug, Clone, Default)]
pub struct GeneratePage {
    files: Vec<FileRecord>,
    rulesets: Vec<Ruleset>,
    selected_file: Option<String>,
    selected_ruleset: Option<String>,
    pub topic: Option<String>,
    generating: bool,
    error: Option<String>,
}

impl GeneratePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Files whose processing completed.
    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    pub fn rulesets(&self) -> &[Ruleset] {
        &self.rulesets
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// Fetch files and rulesets together.
    pub async fn mount(&mut self, api: &dyn QuizApi) {
        match futures::try_join!(api.list_files(), api.list_rulesets()) {
            Ok((files, rulesets)) => {
                self.files = files.into_iter().filter(FileRecord::is_ready).collect();
                self.rulesets = rulesets;
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to load generation choices");
                self.error = Some(LOAD_FAILED.to_string());
            }
        }
    }

    /// Choose a document. Only completed files can be chosen.
    pub fn select_file(&mut self, file_id: &str) -> bool {
        if self.files.iter().any(|f| f.id == file_id) {
            self.selected_file = Some(file_id.to_string());
            true
        } else {
            self.error = Some(format!("File {file_id} is not ready for quiz generation"));
            false
        }
    }

    pub fn select_ruleset(&mut self, ruleset_id: &str) -> bool {
        if self.rulesets.iter().any(|r| r.id == ruleset_id) {
            self.selected_ruleset = Some(ruleset_id.to_string());
            true
        } else {
            self.error = Some(format!("Ruleset {ruleset_id} not found"));
            false
        }
    }

    /// Generate questions, create a quiz from them, and stash the questions
    /// for the quiz page under the new quiz id.
    pub async fn generate(
        &mut self,
        api: &dyn QuizApi,
        store: &dyn KeyValueStore,
    ) -> Option<Route> {
        let (Some(file_id), Some(ruleset_id)) =
            (self.selected_file.clone(), self.selected_ruleset.clone())
        else {
            self.error = Some(SELECTION_REQUIRED.to_string());
            return None;
        };

        self.generating = true;
        self.error = None;
        let outcome = self.create_quiz(api, store, file_id, ruleset_id).await;
        self.generating = false;

        match outcome {
            Ok(quiz) => Some(Route::TakeQuiz(quiz.quiz_id)),
            Err(e) => {
                self.error = Some(error_text(&e, "Failed to generate quiz"));
                None
            }
        }
    }

    async fn create_quiz(
        &self,
        api: &dyn QuizApi,
        store: &dyn KeyValueStore,
        file_id: String,
        ruleset_id: String,
    ) -> Result<Quiz> {
        let time_limit = self
            .rulesets
            .iter()
            .find(|r| r.id == ruleset_id)
            .and_then(|r| r.config.positive_time_limit());

        let questions: Vec<Question> = api
            .generate_questions(&GenerateRequest {
                file_id,
                ruleset_id: ruleset_id.clone(),
                topic: self.topic.clone().filter(|t| !t.trim().is_empty()),
            })
            .await?;

        let quiz = api
            .create_quiz(&CreateQuizRequest {
                ruleset_id,
                question_ids: questions.iter().map(|q| q.id.clone()).collect(),
                time_limit,
            })
            .await?;

        stash_questions(store, &quiz.quiz_id, &questions)?;
        tracing::info!(
            quiz_id = %quiz.quiz_id,
            questions = questions.len(),
            "quiz created"
        );
        Ok(quiz)
    }
}
