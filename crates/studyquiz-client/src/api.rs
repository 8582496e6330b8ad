//! HTTP client for the quiz service.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::instrument;

use studyquiz_core::error::DEFAULT_ERROR_DETAIL;
use studyquiz_core::model::{
    AnswerAck, AnswerSubmission, FileRecord, FileUpload, LoginResponse, Question, Quiz,
    QuizResults, Ruleset, RulesetConfig, SignupResponse, User,
};
use studyquiz_core::storage::TOKEN_KEY;
use studyquiz_core::traits::{CreateQuizRequest, GenerateRequest, QuizApi};
use studyquiz_core::{ApiError, KeyValueStore};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client for the quiz service's REST API.
///
/// Sends `Authorization: Bearer <token>` whenever a token is known. The token
/// is cached in memory and persisted to the key/value store so later runs
/// stay signed in.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    timeout_secs: u64,
    token: RwLock<Option<String>>,
    store: Arc<dyn KeyValueStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        Self::with_timeout(base_url, store, DEFAULT_TIMEOUT_SECS)
    }

    /// Build a client whose requests give up after `timeout_secs`; `0`
    /// disables the timeout.
    pub fn with_timeout(
        base_url: &str,
        store: Arc<dyn KeyValueStore>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(timeout_secs));
        }
        let client = builder.build()?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout_secs,
            token: RwLock::new(None),
            store,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The key/value store holding the token and question stashes.
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Remember `token` in memory and in durable storage.
    pub fn set_token(&self, token: &str) -> Result<()> {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token.to_string());
        }
        self.store.set(TOKEN_KEY, token).map_err(ApiError::from)?;
        Ok(())
    }

    /// The in-memory token, falling back to durable storage.
    pub fn token(&self) -> Option<String> {
        let cached = self.token.read().map(|t| t.clone()).unwrap_or_default();
        if cached.is_some() {
            return cached;
        }
        match self.store.get(TOKEN_KEY) {
            Ok(stored) => stored.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored token");
                None
            }
        }
    }

    /// Forget the token everywhere.
    pub fn clear_token(&self) -> Result<()> {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
        self.store.remove(TOKEN_KEY).map_err(ApiError::from)?;
        Ok(())
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        tracing::debug!(%method, endpoint, "api request");
        let builder = self
            .client
            .request(method, format!("{}{}", self.base_url, endpoint));
        match self.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.timeout_secs)
            } else {
                ApiError::Network(e.to_string())
            }
        })?;

        if !response.status().is_success() {
            return Err(error_from_response(response).await.into());
        }
        Ok(response)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = self.execute(request).await?;
        let parsed = response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(parsed)
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.send(self.request(Method::GET, endpoint)).await
    }

    async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T> {
        self.send(self.request(Method::POST, endpoint).json(body))
            .await
    }

    async fn post_empty<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        self.send(self.request(Method::POST, endpoint)).await
    }
}

/// Turn a non-success response into an [`ApiError::Http`].
///
/// The detail is the JSON body's `detail` field, the whole JSON body when
/// there is no `detail`, or the raw text when the body is not JSON.
async fn error_from_response(response: Response) -> ApiError {
    let status = response.status();
    let url = response.url().to_string();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();
    let detail = match response.text().await {
        Ok(body) => extract_detail(&body),
        Err(_) => DEFAULT_ERROR_DETAIL.to_string(),
    };

    tracing::error!(
        status = status.as_u16(),
        status_text = %status_text,
        url = %url,
        detail = %detail,
        "API error"
    );

    ApiError::Http {
        status: status.as_u16(),
        status_text,
        detail,
    }
}

fn extract_detail(body: &str) -> String {
    if body.trim().is_empty() {
        return DEFAULT_ERROR_DETAIL.to_string();
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(detail)) if !detail.is_empty() => detail.clone(),
            Some(detail) if !detail.is_null() && detail != "" => detail.to_string(),
            _ => value.to_string(),
        },
        Err(_) => body.to_string(),
    }
}

#[derive(Serialize)]
struct SignupBody<'a> {
    email: &'a str,
    password: &'a str,
    full_name: Option<&'a str>,
}

#[derive(Serialize)]
struct LoginBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct RulesetBody<'a> {
    name: &'a str,
    config: &'a RulesetConfig,
}

#[async_trait]
impl QuizApi for ApiClient {
    #[instrument(skip(self, password))]
    async fn signup(
        &self,
        email: &str,
        password: &str,
        full_name: Option<&str>,
    ) -> Result<SignupResponse> {
        self.post(
            "/auth/signup",
            &SignupBody {
                email,
                password,
                full_name,
            },
        )
        .await
    }

    #[instrument(skip(self, password))]
    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let response: LoginResponse = self
            .post("/auth/login", &LoginBody { email, password })
            .await?;
        self.set_token(&response.access_token)?;
        Ok(response)
    }

    fn logout(&self) -> Result<()> {
        self.clear_token()
    }

    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<User> {
        self.get("/users/me").await
    }

    #[instrument(skip(self, upload), fields(filename = %upload.filename))]
    async fn upload_file(&self, upload: &FileUpload) -> Result<FileRecord> {
        let mut part = reqwest::multipart::Part::bytes(upload.bytes.clone())
            .file_name(upload.filename.clone());
        if let Some(mime) = upload.mime_type() {
            part = part.mime_str(mime)?;
        }
        let form = reqwest::multipart::Form::new().part("file", part);

        self.send(self.request(Method::POST, "/files/upload").multipart(form))
            .await
    }

    #[instrument(skip(self))]
    async fn list_files(&self) -> Result<Vec<FileRecord>> {
        self.get("/files").await
    }

    #[instrument(skip(self))]
    async fn file_status(&self, file_id: &str) -> Result<FileRecord> {
        self.get(&format!("/files/{file_id}/status")).await
    }

    #[instrument(skip(self))]
    async fn delete_file(&self, file_id: &str) -> Result<()> {
        self.execute(self.request(Method::DELETE, &format!("/files/{file_id}")))
            .await?;
        Ok(())
    }

    #[instrument(skip(self, config))]
    async fn create_ruleset(&self, name: &str, config: &RulesetConfig) -> Result<Ruleset> {
        self.post("/rulesets", &RulesetBody { name, config }).await
    }

    #[instrument(skip(self))]
    async fn list_rulesets(&self) -> Result<Vec<Ruleset>> {
        self.get("/rulesets").await
    }

    #[instrument(skip(self))]
    async fn get_ruleset(&self, ruleset_id: &str) -> Result<Ruleset> {
        self.get(&format!("/rulesets/{ruleset_id}")).await
    }

    #[instrument(skip(self, request), fields(file_id = %request.file_id, ruleset_id = %request.ruleset_id))]
    async fn generate_questions(&self, request: &GenerateRequest) -> Result<Vec<Question>> {
        self.post("/generate", request).await
    }

    #[instrument(skip(self, request), fields(ruleset_id = %request.ruleset_id))]
    async fn create_quiz(&self, request: &CreateQuizRequest) -> Result<Quiz> {
        self.post("/quizzes", request).await
    }

    #[instrument(skip(self))]
    async fn start_quiz(&self, quiz_id: &str) -> Result<Quiz> {
        self.post_empty(&format!("/quizzes/{quiz_id}/start")).await
    }

    #[instrument(skip(self, answer), fields(question_id = %answer.question_id))]
    async fn submit_answer(&self, quiz_id: &str, answer: &AnswerSubmission) -> Result<AnswerAck> {
        self.post(&format!("/quizzes/{quiz_id}/answer"), answer)
            .await
    }

    #[instrument(skip(self))]
    async fn finish_quiz(&self, quiz_id: &str) -> Result<QuizResults> {
        self.post_empty(&format!("/quizzes/{quiz_id}/finish")).await
    }
}
