//! Mock quiz service for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;

use studyquiz_core::model::{
    AnswerAck, AnswerOutcome, AnswerSubmission, FileRecord, FileStatus, FileUpload,
    LoginResponse, Question, Quiz, QuizResults, QuizStatus, Ruleset, RulesetConfig,
    SignupResponse, User,
};
use studyquiz_core::traits::{CreateQuizRequest, GenerateRequest, QuizApi};
use studyquiz_core::ApiError;

/// An in-process stand-in for the quiz service.
///
/// Keeps users, files, rulesets, and quizzes in memory, grades answers
/// against each question's `answer`, records every call, and can be told to
/// fail specific operations.
pub struct MockApi {
    state: Mutex<MockState>,
}

#[derive(Default)]
struct MockState {
    user: Option<User>,
    token: Option<String>,
    files: Vec<FileRecord>,
    rulesets: Vec<Ruleset>,
    generated: Vec<Question>,
    quizzes: HashMap<String, Quiz>,
    answers: Vec<(String, AnswerSubmission)>,
    serve_questions_on_start: bool,
    failures: HashMap<String, Failure>,
    calls: Vec<String>,
}

struct Failure {
    status: u16,
    detail: String,
    /// `None` fails forever.
    remaining: Option<u32>,
}

impl Default for MockApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockApi {
    /// A service with one signed-up user and nothing else.
    pub fn new() -> Self {
        let state = MockState {
            user: Some(User {
                id: "mock-user".into(),
                email: "student@example.com".into(),
                full_name: Some("Mock Student".into()),
                role: "user".into(),
                created_at: None,
            }),
            ..MockState::default()
        };
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn with_user(self, user: User) -> Self {
        self.state.lock().unwrap().user = Some(user);
        self
    }

    pub fn with_files(self, files: Vec<FileRecord>) -> Self {
        self.state.lock().unwrap().files = files;
        self
    }

    pub fn with_rulesets(self, rulesets: Vec<Ruleset>) -> Self {
        self.state.lock().unwrap().rulesets = rulesets;
        self
    }

    /// Questions returned by every `generate_questions` call.
    pub fn with_generated_questions(self, questions: Vec<Question>) -> Self {
        self.state.lock().unwrap().generated = questions;
        self
    }

    /// Register an existing quiz.
    pub fn with_quiz(self, quiz: Quiz) -> Self {
        self.state
            .lock()
            .unwrap()
            .quizzes
            .insert(quiz.quiz_id.clone(), quiz);
        self
    }

    /// Include the question set in start-quiz responses.
    pub fn serving_questions_on_start(self) -> Self {
        self.state.lock().unwrap().serve_questions_on_start = true;
        self
    }

    /// Make `operation` (a `QuizApi` method name) fail with `status`.
    pub fn fail(self, operation: &str, status: u16, detail: &str) -> Self {
        self.set_failure(operation, status, detail, None);
        self
    }

    /// Make `operation` fail the next `times` calls, then succeed.
    pub fn fail_times(self, operation: &str, times: u32, status: u16, detail: &str) -> Self {
        self.set_failure(operation, status, detail, Some(times));
        self
    }

    fn set_failure(&self, operation: &str, status: u16, detail: &str, remaining: Option<u32>) {
        self.state.lock().unwrap().failures.insert(
            operation.to_string(),
            Failure {
                status,
                detail: detail.to_string(),
                remaining,
            },
        );
    }

    /// Names of the operations called so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|c| c.as_str() == operation)
            .count()
    }

    /// Answers accepted so far as `(quiz_id, submission)`.
    pub fn submitted_answers(&self) -> Vec<(String, AnswerSubmission)> {
        self.state.lock().unwrap().answers.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    pub fn quiz(&self, quiz_id: &str) -> Option<Quiz> {
        self.state.lock().unwrap().quizzes.get(quiz_id).cloned()
    }

    pub fn files(&self) -> Vec<FileRecord> {
        self.state.lock().unwrap().files.clone()
    }

    pub fn rulesets(&self) -> Vec<Ruleset> {
        self.state.lock().unwrap().rulesets.clone()
    }

    /// Log the call and return the configured failure, if any.
    fn enter(&self, operation: &str) -> Result<std::sync::MutexGuard<'_, MockState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(operation.to_string());

        let mut error = None;
        let mut exhausted = false;
        if let Some(failure) = state.failures.get_mut(operation) {
            error = Some(ApiError::http(failure.status, failure.detail.clone()));
            if let Some(remaining) = failure.remaining.as_mut() {
                *remaining = remaining.saturating_sub(1);
                exhausted = *remaining == 0;
            }
        }
        if exhausted {
            state.failures.remove(operation);
        }
        match error {
            Some(e) => Err(e.into()),
            None => Ok(state),
        }
    }
}

fn not_found(what: &str) -> anyhow::Error {
    ApiError::http(404, format!("{what} not found")).into()
}

#[async_trait]
impl QuizApi for MockApi {
    async fn signup(
        &self,
        email: &str,
        _password: &str,
        full_name: Option<&str>,
    ) -> Result<SignupResponse> {
        let mut state = self.enter("signup")?;
        let user = User {
            id: uuid::Uuid::new_v4().to_string(),
            email: email.to_string(),
            full_name: full_name.map(str::to_string),
            role: "user".into(),
            created_at: None,
        };
        let response = SignupResponse {
            message: "User created successfully".into(),
            user_id: user.id.clone(),
            email: user.email.clone(),
        };
        state.user = Some(user);
        Ok(response)
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse> {
        let mut state = self.enter("login")?;
        let token = format!("mock-token-{}", uuid::Uuid::new_v4());
        state.token = Some(token.clone());
        Ok(LoginResponse {
            access_token: token,
            refresh_token: None,
            token_type: "bearer".into(),
            expires_in: Some(3600),
        })
    }

    fn logout(&self) -> Result<()> {
        let mut state = self.enter("logout")?;
        state.token = None;
        Ok(())
    }

    async fn current_user(&self) -> Result<User> {
        let state = self.enter("current_user")?;
        state.user.clone().ok_or_else(|| not_found("User profile"))
    }

    async fn upload_file(&self, upload: &FileUpload) -> Result<FileRecord> {
        let mut state = self.enter("upload_file")?;
        let record = FileRecord {
            id: uuid::Uuid::new_v4().to_string(),
            filename: upload.filename.clone(),
            status: FileStatus::Pending,
            error_message: None,
            uploaded_at: "2025-01-01T00:00:00".into(),
            size: Some(upload.bytes.len() as u64),
        };
        state.files.push(record.clone());
        Ok(record)
    }

    async fn list_files(&self) -> Result<Vec<FileRecord>> {
        let state = self.enter("list_files")?;
        Ok(state.files.clone())
    }

    async fn file_status(&self, file_id: &str) -> Result<FileRecord> {
        let state = self.enter("file_status")?;
        state
            .files
            .iter()
            .find(|f| f.id == file_id)
            .cloned()
            .ok_or_else(|| not_found("File"))
    }

    async fn delete_file(&self, file_id: &str) -> Result<()> {
        let mut state = self.enter("delete_file")?;
        let before = state.files.len();
        state.files.retain(|f| f.id != file_id);
        if state.files.len() == before {
            return Err(not_found("File"));
        }
        Ok(())
    }

    async fn create_ruleset(&self, name: &str, config: &RulesetConfig) -> Result<Ruleset> {
        let mut state = self.enter("create_ruleset")?;
        let ruleset = Ruleset {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.to_string(),
            owner_id: state.user.as_ref().map(|u| u.id.clone()),
            config: config.clone(),
            created_at: None,
        };
        state.rulesets.push(ruleset.clone());
        Ok(ruleset)
    }

    async fn list_rulesets(&self) -> Result<Vec<Ruleset>> {
        let state = self.enter("list_rulesets")?;
        Ok(state.rulesets.clone())
    }

    async fn get_ruleset(&self, ruleset_id: &str) -> Result<Ruleset> {
        let state = self.enter("get_ruleset")?;
        state
            .rulesets
            .iter()
            .find(|r| r.id == ruleset_id)
            .cloned()
            .ok_or_else(|| not_found("Ruleset"))
    }

    async fn generate_questions(&self, request: &GenerateRequest) -> Result<Vec<Question>> {
        let state = self.enter("generate_questions")?;
        if !state.files.iter().any(|f| f.id == request.file_id) {
            return Err(not_found("File"));
        }
        if !state.rulesets.iter().any(|r| r.id == request.ruleset_id) {
            return Err(not_found("Ruleset"));
        }
        Ok(state.generated.clone())
    }

    async fn create_quiz(&self, request: &CreateQuizRequest) -> Result<Quiz> {
        let mut state = self.enter("create_quiz")?;
        let grading_style = state
            .rulesets
            .iter()
            .find(|r| r.id == request.ruleset_id)
            .map(|r| r.config.grading_style)
            .unwrap_or_default();
        let quiz = Quiz {
            quiz_id: uuid::Uuid::new_v4().to_string(),
            owner_id: state.user.as_ref().map(|u| u.id.clone()),
            question_ids: request.question_ids.clone(),
            start_time: None,
            end_time: None,
            timed: request.time_limit.is_some(),
            grading_style,
            status: QuizStatus::Created,
            questions: None,
        };
        state.quizzes.insert(quiz.quiz_id.clone(), quiz.clone());
        Ok(quiz)
    }

    async fn start_quiz(&self, quiz_id: &str) -> Result<Quiz> {
        let mut state = self.enter("start_quiz")?;
        let serve = state.serve_questions_on_start;
        let generated = state.generated.clone();
        let quiz = state
            .quizzes
            .get_mut(quiz_id)
            .ok_or_else(|| not_found("Quiz"))?;
        quiz.status = QuizStatus::InProgress;
        quiz.start_time = Some("2025-01-01T10:00:00".into());

        let mut response = quiz.clone();
        if serve {
            response.questions = Some(
                generated
                    .into_iter()
                    .filter(|q| response.question_ids.contains(&q.id))
                    .collect(),
            );
        }
        Ok(response)
    }

    async fn submit_answer(&self, quiz_id: &str, answer: &AnswerSubmission) -> Result<AnswerAck> {
        let mut state = self.enter("submit_answer")?;
        if !state.quizzes.contains_key(quiz_id) {
            return Err(not_found("Quiz"));
        }
        state.answers.push((quiz_id.to_string(), answer.clone()));
        Ok(AnswerAck {
            message: "Answer submitted successfully".into(),
        })
    }

    async fn finish_quiz(&self, quiz_id: &str) -> Result<QuizResults> {
        let mut state = self.enter("finish_quiz")?;
        let total_questions = state
            .quizzes
            .get(quiz_id)
            .ok_or_else(|| not_found("Quiz"))?
            .question_ids
            .len() as u32;

        let answers: Vec<AnswerOutcome> = state
            .answers
            .iter()
            .filter(|(id, _)| id == quiz_id)
            .map(|(_, submission)| {
                let correct_answer = state
                    .generated
                    .iter()
                    .find(|q| q.id == submission.question_id)
                    .and_then(|q| q.answer.clone());
                AnswerOutcome {
                    question_id: submission.question_id.clone(),
                    selected_answer: submission.selected_answer.clone(),
                    is_correct: correct_answer.as_deref()
                        == Some(submission.selected_answer.as_str()),
                    correct_answer,
                }
            })
            .collect();

        let correct_answers = answers.iter().filter(|a| a.is_correct).count() as u32;
        let score = if total_questions > 0 {
            correct_answers as f64 / total_questions as f64 * 100.0
        } else {
            0.0
        };

        if let Some(quiz) = state.quizzes.get_mut(quiz_id) {
            quiz.status = QuizStatus::Completed;
            quiz.end_time = Some("2025-01-01T10:05:00".into());
        }

        Ok(QuizResults {
            quiz_id: quiz_id.to_string(),
            score,
            total_questions,
            correct_answers,
            time_taken: Some(5),
            answers,
        })
    }
}
