//! The `QuizApi` seam between pages and the quiz service.
//!
//! Implemented by the HTTP client in `studyquiz-client` and by its in-process
//! mock for tests.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{
    AnswerAck, AnswerSubmission, FileRecord, FileUpload, LoginResponse, Question, Quiz,
    QuizResults, Ruleset, RulesetConfig, SignupResponse, User,
};

/// One method per remote operation. Errors are [`crate::ApiError`] values
/// wrapped in `anyhow`.
#[async_trait]
pub trait QuizApi: Send + Sync {
    /// `POST /auth/signup`.
    async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<SignupResponse>;

    /// `POST /auth/login`. Stores the returned access token.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;

    /// Forget the stored access token.
    fn logout(&self) -> Result<()>;

    /// `GET /users/me`.
    async fn current_user(&self) -> Result<User>;

    /// `POST /files/upload` as a multipart form.
    async fn upload_file(&self, upload: &FileUpload) -> Result<FileRecord>;

    /// `GET /files`.
    async fn list_files(&self) -> Result<Vec<FileRecord>>;

    /// `GET /files/{id}/status`.
    async fn file_status(&self, file_id: &str) -> Result<FileRecord>;

    /// `DELETE /files/{id}`.
    async fn delete_file(&self, file_id: &str) -> Result<()>;

    /// `POST /rulesets`.
    async fn create_ruleset(&self, name: &str, config: &RulesetConfig) -> Result<Ruleset>;

    /// `GET /rulesets`.
    async fn list_rulesets(&self) -> Result<Vec<Ruleset>>;

    /// `GET /rulesets/{id}`.
    async fn get_ruleset(&self, ruleset_id: &str) -> Result<Ruleset>;

    /// `POST /generate`.
    async fn generate_questions(&self, request: &GenerateRequest) -> Result<Vec<Question>>;

    /// `POST /quizzes`.
    async fn create_quiz(&self, request: &CreateQuizRequest) -> Result<Quiz>;

    /// `POST /quizzes/{id}/start`.
    async fn start_quiz(&self, quiz_id: &str) -> Result<Quiz>;

    /// `POST /quizzes/{id}/answer`.
    async fn submit_answer(&self, quiz_id: &str, answer: &AnswerSubmission) -> Result<AnswerAck>;

    /// `POST /quizzes/{id}/finish`.
    async fn finish_quiz(&self, quiz_id: &str) -> Result<QuizResults>;
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub file_id: String,
    pub ruleset_id: String,
    #[serde(default)]
    pub topic: Option<String>,
}

/// Body of `POST /quizzes`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateQuizRequest {
    pub ruleset_id: String,
    pub question_ids: Vec<String>,
    /// Minutes; `None` creates an untimed quiz.
    #[serde(default)]
    pub time_limit: Option<u32>,
}
