//! Records exchanged with the quiz service.
//!
//! Every entity here is owned by the remote service. The client only reads
//! them, passes their identifiers back, and renders them as received.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Users and auth
// ---------------------------------------------------------------------------

/// The signed-in user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

fn default_role() -> String {
    "user".to_string()
}

impl User {
    /// Full name when set, otherwise the email address.
    pub fn display_name(&self) -> &str {
        match self.full_name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }
}

/// Response to `POST /auth/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
}

/// Response to `POST /auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for LoginResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginResponse")
            .field("access_token", &"***")
            .field("refresh_token", &self.refresh_token.as_ref().map(|_| "***"))
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Files
// ---------------------------------------------------------------------------

/// Processing state of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl fmt::Display for FileStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileStatus::Pending => write!(f, "pending"),
            FileStatus::Processing => write!(f, "processing"),
            FileStatus::Completed => write!(f, "completed"),
            FileStatus::Failed => write!(f, "failed"),
        }
    }
}

/// An uploaded document as listed by `GET /files`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    pub id: String,
    pub filename: String,
    pub status: FileStatus,
    /// The service sends `""` when there is no error.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub error_message: Option<String>,
    pub uploaded_at: String,
    #[serde(default)]
    pub size: Option<u64>,
}

impl FileRecord {
    /// The error message, only for files whose processing failed.
    pub fn failure_message(&self) -> Option<&str> {
        match self.status {
            FileStatus::Failed => self.error_message.as_deref(),
            _ => None,
        }
    }

    /// Whether questions can be generated from this file.
    pub fn is_ready(&self) -> bool {
        self.status == FileStatus::Completed
    }

    /// Calendar date of the upload, if the timestamp parses.
    pub fn uploaded_date(&self) -> Option<NaiveDate> {
        parse_timestamp(&self.uploaded_at).map(|ts| ts.date())
    }
}

/// Parse a service timestamp. Accepts RFC 3339 and naive ISO-8601.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.naive_local());
    }
    raw.parse::<NaiveDateTime>().ok()
}

fn empty_as_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.is_empty()))
}

/// File extensions the service accepts for upload.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "ppt", "pptx"];

/// A document selected for upload.
#[derive(Clone, PartialEq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for FileUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileUpload")
            .field("filename", &self.filename)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Read a document from disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        let filename = path
            .file_name()
            .and_then(|n| n.to_str())
            .with_context(|| format!("not a file path: {}", path.display()))?
            .to_string();
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Ok(Self { filename, bytes })
    }

    /// Lowercased extension without the dot.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    pub fn is_allowed_type(&self) -> bool {
        self.extension()
            .is_some_and(|ext| ALLOWED_EXTENSIONS.contains(&ext.as_str()))
    }

    /// MIME type sent with the multipart part.
    pub fn mime_type(&self) -> Option<&'static str> {
        match self.extension()?.as_str() {
            "pdf" => Some("application/pdf"),
            "ppt" => Some("application/vnd.ms-powerpoint"),
            "pptx" => {
                Some("application/vnd.openxmlformats-officedocument.presentationml.presentation")
            }
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Rulesets
// ---------------------------------------------------------------------------

/// Question difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hardness {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl fmt::Display for Hardness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hardness::Easy => write!(f, "easy"),
            Hardness::Medium => write!(f, "medium"),
            Hardness::Hard => write!(f, "hard"),
        }
    }
}

impl FromStr for Hardness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Hardness::Easy),
            "medium" => Ok(Hardness::Medium),
            "hard" => Ok(Hardness::Hard),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// When answers are graded and shown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradingStyle {
    #[default]
    EndOnly,
    Immediate,
}

impl fmt::Display for GradingStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradingStyle::EndOnly => write!(f, "end_only"),
            GradingStyle::Immediate => write!(f, "immediate"),
        }
    }
}

impl FromStr for GradingStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "end_only" | "end" => Ok(GradingStyle::EndOnly),
            "immediate" => Ok(GradingStyle::Immediate),
            other => Err(format!("unknown grading style: {other}")),
        }
    }
}

/// Cognitive-skill tag from Bloom's taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BloomLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl BloomLevel {
    /// All levels, lowest to highest.
    pub const ALL: [BloomLevel; 6] = [
        BloomLevel::Remember,
        BloomLevel::Understand,
        BloomLevel::Apply,
        BloomLevel::Analyze,
        BloomLevel::Evaluate,
        BloomLevel::Create,
    ];
}

impl fmt::Display for BloomLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BloomLevel::Remember => "remember",
            BloomLevel::Understand => "understand",
            BloomLevel::Apply => "apply",
            BloomLevel::Analyze => "analyze",
            BloomLevel::Evaluate => "evaluate",
            BloomLevel::Create => "create",
        };
        f.write_str(name)
    }
}

impl FromStr for BloomLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BloomLevel::ALL
            .into_iter()
            .find(|level| level.to_string() == s.to_lowercase())
            .ok_or_else(|| format!("unknown bloom level: {s}"))
    }
}

/// Kind of generated question. The form only produces multiple choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionType {
    Mcq,
}

/// Configuration object stored with a ruleset.
///
/// The service stores this as a free-form object, so decoding tolerates
/// `null` fields and out-of-range numbers written by other clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RulesetConfig {
    #[serde(default, deserialize_with = "null_as_default")]
    pub hardness: Hardness,
    #[serde(
        default = "default_num_questions",
        deserialize_with = "num_questions_or_default"
    )]
    pub num_questions: i64,
    /// Minutes; `null` when the quiz is untimed.
    #[serde(default)]
    pub time_limit: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub grading_style: GradingStyle,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bloom_levels: Vec<BloomLevel>,
    #[serde(
        default = "default_question_types",
        deserialize_with = "question_types_or_default"
    )]
    pub question_types: Vec<QuestionType>,
}

fn default_num_questions() -> i64 {
    10
}

fn default_question_types() -> Vec<QuestionType> {
    vec![QuestionType::Mcq]
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn num_questions_or_default<'de, D>(deserializer: D) -> std::result::Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?.unwrap_or_else(default_num_questions))
}

fn question_types_or_default<'de, D>(
    deserializer: D,
) -> std::result::Result<Vec<QuestionType>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<QuestionType>>::deserialize(deserializer)?
        .unwrap_or_else(default_question_types))
}

impl RulesetConfig {
    /// The time limit as a positive minute count, if the ruleset is timed.
    pub fn positive_time_limit(&self) -> Option<u32> {
        self.time_limit
            .and_then(|minutes| u32::try_from(minutes).ok())
            .filter(|minutes| *minutes > 0)
    }
}

impl Default for RulesetConfig {
    fn default() -> Self {
        Self {
            hardness: Hardness::Medium,
            num_questions: default_num_questions(),
            time_limit: None,
            grading_style: GradingStyle::EndOnly,
            bloom_levels: vec![BloomLevel::Remember, BloomLevel::Understand],
            question_types: default_question_types(),
        }
    }
}

/// A named, reusable quiz-generation configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ruleset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    pub config: RulesetConfig,
    #[serde(default)]
    pub created_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Questions and quizzes
// ---------------------------------------------------------------------------

/// One answer option. The service normally sends plain strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerOption {
    Text(String),
    Detailed {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        is_correct: Option<bool>,
    },
}

impl AnswerOption {
    pub fn text(&self) -> &str {
        match self {
            AnswerOption::Text(text) | AnswerOption::Detailed { text, .. } => text,
        }
    }
}

/// A generated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub question_text: String,
    #[serde(default)]
    pub options: Vec<AnswerOption>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub bloom_level: Option<String>,
    #[serde(default)]
    pub topic: Option<String>,
}

impl Question {
    pub fn option_texts(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(AnswerOption::text)
    }

    pub fn has_option(&self, answer: &str) -> bool {
        self.option_texts().any(|o| o == answer)
    }
}

/// Lifecycle of a quiz session on the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuizStatus {
    Created,
    InProgress,
    Completed,
}

/// A quiz record as returned by create and start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quiz {
    pub quiz_id: String,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub question_ids: Vec<String>,
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub timed: bool,
    #[serde(default)]
    pub grading_style: GradingStyle,
    pub status: QuizStatus,
    /// Present only when the service returns the question set on start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub questions: Option<Vec<Question>>,
}

/// Body of `POST /quizzes/{id}/answer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question_id: String,
    pub selected_answer: String,
}

/// Acknowledgement of a submitted answer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnswerAck {
    #[serde(default)]
    pub message: String,
}

/// Per-question outcome inside [`QuizResults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerOutcome {
    pub question_id: String,
    pub selected_answer: String,
    #[serde(default)]
    pub correct_answer: Option<String>,
    pub is_correct: bool,
}

/// Scored results returned by `POST /quizzes/{id}/finish`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResults {
    pub quiz_id: String,
    /// Percentage in `0.0..=100.0`.
    #[serde(default)]
    pub score: f64,
    pub total_questions: u32,
    pub correct_answers: u32,
    /// Minutes as reported by the service; may be negative when its clock
    /// zone disagrees with UTC.
    #[serde(default)]
    pub time_taken: Option<i64>,
    #[serde(default)]
    pub answers: Vec<AnswerOutcome>,
}

impl QuizResults {
    /// Score formatted to one decimal place, e.g. `"66.7%"`.
    pub fn percentage(&self) -> String {
        format!("{:.1}%", self.score)
    }

    pub fn summary(&self) -> String {
        format!(
            "{} out of {} correct",
            self.correct_answers, self.total_questions
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_record_accepts_empty_error_message() {
        let json = r#"{
            "id": "f1",
            "filename": "notes.pdf",
            "status": "completed",
            "uploaded_at": "2025-03-01T10:15:00.123456",
            "error_message": "",
            "size": 2048
        }"#;
        let file: FileRecord = serde_json::from_str(json).unwrap();
        assert_eq!(file.status, FileStatus::Completed);
        assert!(file.error_message.is_none());
        assert!(file.is_ready());
        assert_eq!(
            file.uploaded_date(),
            Some(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
        );
    }

    #[test]
    fn failure_message_only_for_failed_files() {
        let mut file = FileRecord {
            id: "f1".into(),
            filename: "slides.pptx".into(),
            status: FileStatus::Failed,
            error_message: Some("could not extract text".into()),
            uploaded_at: "2025-03-01T10:15:00Z".into(),
            size: None,
        };
        assert_eq!(file.failure_message(), Some("could not extract text"));
        file.status = FileStatus::Processing;
        assert_eq!(file.failure_message(), None);
    }

    #[test]
    fn upload_type_checks() {
        assert!(FileUpload::new("Lecture.PDF", vec![]).is_allowed_type());
        assert!(FileUpload::new("deck.pptx", vec![]).is_allowed_type());
        assert!(!FileUpload::new("notes.txt", vec![]).is_allowed_type());
        assert!(!FileUpload::new("README", vec![]).is_allowed_type());
        assert_eq!(
            FileUpload::new("a.ppt", vec![]).mime_type(),
            Some("application/vnd.ms-powerpoint")
        );
    }

    #[test]
    fn ruleset_config_serializes_null_time_limit() {
        let config = RulesetConfig::default();
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["hardness"], "medium");
        assert_eq!(value["num_questions"], 10);
        assert!(value["time_limit"].is_null());
        assert_eq!(value["grading_style"], "end_only");
        assert_eq!(
            value["bloom_levels"],
            serde_json::json!(["remember", "understand"])
        );
        assert_eq!(value["question_types"], serde_json::json!(["mcq"]));
    }

    #[test]
    fn enums_parse_from_cli_strings() {
        assert_eq!("Hard".parse::<Hardness>().unwrap(), Hardness::Hard);
        assert_eq!(
            "end-only".parse::<GradingStyle>().unwrap(),
            GradingStyle::EndOnly
        );
        assert_eq!("analyze".parse::<BloomLevel>().unwrap(), BloomLevel::Analyze);
        assert!("synthesize".parse::<BloomLevel>().is_err());
    }

    #[test]
    fn question_options_accept_strings_and_objects() {
        let json = r#"{
            "id": "q1",
            "question_text": "What is 2 + 2?",
            "options": ["3", {"text": "4", "is_correct": true}],
            "answer": "4"
        }"#;
        let question: Question = serde_json::from_str(json).unwrap();
        assert_eq!(question.option_texts().collect::<Vec<_>>(), vec!["3", "4"]);
        assert!(question.has_option("4"));
        assert!(!question.has_option("5"));
    }

    #[test]
    fn results_formatting() {
        let results = QuizResults {
            quiz_id: "z".into(),
            score: 200.0 / 3.0,
            total_questions: 3,
            correct_answers: 2,
            time_taken: Some(4),
            answers: vec![],
        };
        assert_eq!(results.percentage(), "66.7%");
        assert_eq!(results.summary(), "2 out of 3 correct");
    }

    #[test]
    fn results_keep_negative_time_taken() {
        let json = r#"{
            "quiz_id": "z",
            "score": 50.0,
            "total_questions": 2,
            "correct_answers": 1,
            "time_taken": -330,
            "answers": []
        }"#;
        let results: QuizResults = serde_json::from_str(json).unwrap();
        assert_eq!(results.time_taken, Some(-330));
        assert_eq!(results.percentage(), "50.0%");
    }

    #[test]
    fn ruleset_list_tolerates_odd_configs() {
        let json = r#"[
            {"id": "r1", "name": "Good", "config": {"hardness": "easy", "num_questions": 5,
                "time_limit": 20, "grading_style": "immediate",
                "bloom_levels": ["apply"], "question_types": ["mcq"]}},
            {"id": "r2", "name": "Odd", "config": {"hardness": null, "num_questions": null,
                "time_limit": -5, "grading_style": null, "bloom_levels": null,
                "question_types": null}}
        ]"#;
        let rulesets: Vec<Ruleset> = serde_json::from_str(json).unwrap();
        assert_eq!(rulesets.len(), 2);
        assert_eq!(rulesets[0].config.positive_time_limit(), Some(20));

        let odd = &rulesets[1].config;
        assert_eq!(odd.hardness, Hardness::Medium);
        assert_eq!(odd.num_questions, 10);
        assert_eq!(odd.time_limit, Some(-5));
        assert_eq!(odd.positive_time_limit(), None);
        assert_eq!(odd.grading_style, GradingStyle::EndOnly);
        assert!(odd.bloom_levels.is_empty());
        assert_eq!(odd.question_types, vec![QuestionType::Mcq]);
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let mut user = User {
            id: "u1".into(),
            email: "ada@example.com".into(),
            full_name: None,
            role: "user".into(),
            created_at: None,
        };
        assert_eq!(user.display_name(), "ada@example.com");
        user.full_name = Some("Ada Lovelace".into());
        assert_eq!(user.display_name(), "Ada Lovelace");
    }
}
