//! Page flows driven against the in-process mock service.

use studyquiz_client::MockApi;
use studyquiz_core::model::{
    AnswerOption, FileRecord, FileStatus, FileUpload, GradingStyle, Question, Quiz, QuizStatus,
    Ruleset, RulesetConfig,
};
use studyquiz_core::pages::generate::SELECTION_REQUIRED;
use studyquiz_core::pages::quiz::NO_QUESTIONS;
use studyquiz_core::pages::ruleset::NAME_REQUIRED;
use studyquiz_core::pages::upload::NO_FILE_SELECTED;
use studyquiz_core::pages::{
    DashboardPage, GeneratePage, LoginPage, QuizPage, ResultsPage, RulesetForm, SignupPage,
    UploadPage,
};
use studyquiz_core::storage::{question_stash_key, stash_questions};
use studyquiz_core::{KeyValueStore, MemoryStore, QuizApi, Route};

fn file(id: &str, status: FileStatus) -> FileRecord {
    FileRecord {
        id: id.into(),
        filename: format!("{id}.pdf"),
        status,
        error_message: None,
        uploaded_at: "2025-03-01T09:30:00".into(),
        size: Some(1024),
    }
}

fn ruleset(id: &str, time_limit: Option<i64>) -> Ruleset {
    Ruleset {
        id: id.into(),
        name: format!("Ruleset {id}"),
        owner_id: Some("mock-user".into()),
        config: RulesetConfig {
            time_limit,
            ..RulesetConfig::default()
        },
        created_at: None,
    }
}

fn question(id: &str, answer: &str) -> Question {
    Question {
        id: id.into(),
        question_text: format!("What is {id}?"),
        options: ["A", "B", "C", "D"]
            .iter()
            .map(|o| AnswerOption::Text(o.to_string()))
            .collect(),
        answer: Some(answer.into()),
        difficulty: Some("medium".into()),
        bloom_level: Some("remember".into()),
        topic: None,
    }
}

fn quiz(id: &str, question_ids: &[&str]) -> Quiz {
    Quiz {
        quiz_id: id.into(),
        owner_id: Some("mock-user".into()),
        question_ids: question_ids.iter().map(|q| q.to_string()).collect(),
        start_time: None,
        end_time: None,
        timed: false,
        grading_style: GradingStyle::EndOnly,
        status: QuizStatus::Created,
        questions: None,
    }
}

// --- Auth ---

#[tokio::test]
async fn login_navigates_to_dashboard() {
    let api = MockApi::new();
    let mut page = LoginPage::new("student@example.com", "secret");

    let route = page.submit(&api).await;

    assert_eq!(route, Some(Route::Dashboard));
    assert!(page.error().is_none());
    assert!(!page.is_submitting());
    assert!(api.token().is_some());
}

#[tokio::test]
async fn login_failure_shows_service_detail() {
    let api = MockApi::new().fail("login", 401, "Invalid credentials");
    let mut page = LoginPage::new("student@example.com", "wrong");

    assert_eq!(page.submit(&api).await, None);
    assert_eq!(page.error(), Some("401 Unauthorized: Invalid credentials"));
    assert!(!page.is_submitting());
}

#[tokio::test]
async fn login_with_blank_fields_makes_no_call() {
    let api = MockApi::new();
    let mut page = LoginPage::new("", "");

    assert_eq!(page.submit(&api).await, None);
    assert!(page.error().is_some());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn signup_navigates_to_login() {
    let api = MockApi::new();
    let mut page = SignupPage::new("new@example.com", "secret", Some("  ".into()));

    assert_eq!(page.submit(&api).await, Some(Route::Login));

    let user = api.current_user().await.unwrap();
    assert_eq!(user.email, "new@example.com");
    assert_eq!(user.full_name, None);
}

#[tokio::test]
async fn signup_failure_stays_on_page() {
    let api = MockApi::new().fail("signup", 400, "Email already registered");
    let mut page = SignupPage::new("taken@example.com", "secret", None);

    assert_eq!(page.submit(&api).await, None);
    assert_eq!(page.error(), Some("400 Bad Request: Email already registered"));
}

// --- Dashboard ---

#[tokio::test]
async fn dashboard_loads_user_and_files() {
    let api = MockApi::new().with_files(vec![
        file("f1", FileStatus::Completed),
        file("f2", FileStatus::Processing),
    ]);
    let mut page = DashboardPage::new();

    assert_eq!(page.mount(&api).await, None);

    let view = page.state().ready().unwrap();
    assert_eq!(view.greeting(), "Welcome back, Mock Student");
    assert_eq!(view.files.len(), 2);
}

#[tokio::test]
async fn dashboard_redirects_to_login_when_profile_fails() {
    let api = MockApi::new().fail("current_user", 401, "Not authenticated");
    let mut page = DashboardPage::new();

    assert_eq!(page.mount(&api).await, Some(Route::Login));
    assert!(page.state().error().is_some());
}

#[tokio::test]
async fn dashboard_redirects_to_login_when_files_fail() {
    let api = MockApi::new().fail("list_files", 500, "database down");
    let mut page = DashboardPage::new();

    assert_eq!(page.mount(&api).await, Some(Route::Login));
}

#[tokio::test]
async fn logout_clears_token_and_goes_home() {
    let api = MockApi::new();
    api.login("student@example.com", "secret").await.unwrap();
    let mut page = DashboardPage::new();
    page.mount(&api).await;

    assert_eq!(page.logout(&api).unwrap(), Route::Home);
    assert!(api.token().is_none());
}

// --- Upload ---

#[tokio::test]
async fn upload_without_file_is_refused_locally() {
    let api = MockApi::new();
    let mut page = UploadPage::new();

    assert_eq!(page.submit(&api).await, None);
    assert_eq!(page.error(), Some(NO_FILE_SELECTED));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn upload_success_returns_to_dashboard() {
    let api = MockApi::new();
    let mut page = UploadPage::new();
    assert!(page.select(FileUpload::new("lecture.pptx", vec![1, 2, 3])));

    assert_eq!(page.submit(&api).await, Some(Route::Dashboard));
    assert!(!page.is_uploading());

    let files = api.files();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].filename, "lecture.pptx");
    assert_eq!(files[0].status, FileStatus::Pending);
}

#[tokio::test]
async fn upload_failure_keeps_selection() {
    let api = MockApi::new().fail("upload_file", 413, "File too large");
    let mut page = UploadPage::new();
    page.select(FileUpload::new("huge.pdf", vec![0; 16]));

    assert_eq!(page.submit(&api).await, None);
    assert_eq!(page.error(), Some("413 Payload Too Large: File too large"));
    assert!(page.selected().is_some());
}

// --- Ruleset ---

#[tokio::test]
async fn ruleset_without_name_makes_no_call() {
    let api = MockApi::new();
    let mut form = RulesetForm::new();

    assert_eq!(form.submit(&api).await, None);
    assert_eq!(form.error(), Some(NAME_REQUIRED));
    assert_eq!(api.call_count("create_ruleset"), 0);
}

#[tokio::test]
async fn ruleset_submission_sends_form_values() {
    let api = MockApi::new();
    let mut form = RulesetForm::new();
    form.name = "  Chapter 3  ".into();
    form.num_questions = 5;
    form.timed = true;
    form.time_limit = Some(20);

    assert_eq!(form.submit(&api).await, Some(Route::Dashboard));

    let rulesets = api.rulesets();
    assert_eq!(rulesets.len(), 1);
    assert_eq!(rulesets[0].name, "Chapter 3");
    assert_eq!(rulesets[0].config.num_questions, 5);
    assert_eq!(rulesets[0].config.time_limit, Some(20));
}

// --- Generate ---

#[tokio::test]
async fn generate_lists_only_completed_files() {
    let api = MockApi::new()
        .with_files(vec![
            file("done", FileStatus::Completed),
            file("busy", FileStatus::Processing),
            file("bad", FileStatus::Failed),
        ])
        .with_rulesets(vec![ruleset("r1", None)]);
    let mut page = GeneratePage::new();
    page.mount(&api).await;

    let ids: Vec<&str> = page.files().iter().map(|f| f.id.as_str()).collect();
    assert_eq!(ids, vec!["done"]);
    assert_eq!(page.rulesets().len(), 1);
    assert!(!page.select_file("busy"));
}

#[tokio::test]
async fn generate_load_failure_shows_message() {
    let api = MockApi::new().fail("list_rulesets", 500, "boom");
    let mut page = GeneratePage::new();
    page.mount(&api).await;

    assert_eq!(page.error(), Some("Failed to load data"));
}

#[tokio::test]
async fn generate_without_selection_errors() {
    let api = MockApi::new().with_files(vec![file("f1", FileStatus::Completed)]);
    let store = MemoryStore::new();
    let mut page = GeneratePage::new();
    page.mount(&api).await;
    page.select_file("f1");

    assert_eq!(page.generate(&api, &store).await, None);
    assert_eq!(page.error(), Some(SELECTION_REQUIRED));
    assert_eq!(api.call_count("generate_questions"), 0);
}

#[tokio::test]
async fn generate_stashes_questions_and_opens_quiz() {
    let questions = vec![question("q1", "A"), question("q2", "C")];
    let api = MockApi::new()
        .with_files(vec![file("f1", FileStatus::Completed)])
        .with_rulesets(vec![ruleset("r1", Some(15))])
        .with_generated_questions(questions.clone());
    let store = MemoryStore::new();
    let mut page = GeneratePage::new();
    page.mount(&api).await;
    assert!(page.select_file("f1"));
    assert!(page.select_ruleset("r1"));

    let Some(Route::TakeQuiz(quiz_id)) = page.generate(&api, &store).await else {
        panic!("expected navigation to the quiz, got error {:?}", page.error());
    };

    let quiz = api.quiz(&quiz_id).unwrap();
    assert_eq!(quiz.question_ids, vec!["q1", "q2"]);
    assert!(quiz.timed);

    let stashed = store.get(&question_stash_key(&quiz_id)).unwrap().unwrap();
    let stashed: Vec<Question> = serde_json::from_str(&stashed).unwrap();
    assert_eq!(stashed, questions);
}

#[tokio::test]
async fn generate_with_negative_time_limit_creates_untimed_quiz() {
    let api = MockApi::new()
        .with_files(vec![file("f1", FileStatus::Completed)])
        .with_rulesets(vec![ruleset("r1", Some(-5))])
        .with_generated_questions(vec![question("q1", "A")]);
    let store = MemoryStore::new();
    let mut page = GeneratePage::new();
    page.mount(&api).await;
    page.select_file("f1");
    page.select_ruleset("r1");

    let Some(Route::TakeQuiz(quiz_id)) = page.generate(&api, &store).await else {
        panic!("expected navigation to the quiz, got error {:?}", page.error());
    };
    assert!(!api.quiz(&quiz_id).unwrap().timed);
}

#[tokio::test]
async fn generate_failure_leaves_no_stash() {
    let api = MockApi::new()
        .with_files(vec![file("f1", FileStatus::Completed)])
        .with_rulesets(vec![ruleset("r1", None)])
        .fail("create_quiz", 500, "could not create quiz");
    let store = MemoryStore::new();
    let mut page = GeneratePage::new();
    page.mount(&api).await;
    page.select_file("f1");
    page.select_ruleset("r1");

    assert_eq!(page.generate(&api, &store).await, None);
    assert_eq!(
        page.error(),
        Some("500 Internal Server Error: could not create quiz")
    );
    assert!(!page.is_generating());
}

// --- Quiz ---

fn stashed_quiz(store: &MemoryStore) -> MockApi {
    let questions = vec![question("q1", "A"), question("q2", "B")];
    stash_questions(store, "quiz-1", &questions).unwrap();
    MockApi::new()
        .with_generated_questions(questions)
        .with_quiz(quiz("quiz-1", &["q1", "q2"]))
}

#[tokio::test]
async fn quiz_loads_stashed_questions() {
    let store = MemoryStore::new();
    let api = stashed_quiz(&store);
    let mut page = QuizPage::new("quiz-1");
    page.mount(&api, &store).await;

    let session = page.state().ready().unwrap();
    assert_eq!(session.len(), 2);
    assert_eq!(session.position_label(), "Question 1 of 2");
    assert_eq!(session.progress_percent(), 50.0);
    assert_eq!(api.quiz("quiz-1").unwrap().status, QuizStatus::InProgress);
}

#[tokio::test]
async fn quiz_prefers_questions_from_start_response() {
    let store = MemoryStore::new();
    stash_questions(&store, "quiz-1", &[question("stale", "A")]).unwrap();
    let api = MockApi::new()
        .with_generated_questions(vec![question("q1", "A"), question("q2", "B")])
        .with_quiz(quiz("quiz-1", &["q1", "q2"]))
        .serving_questions_on_start();
    let mut page = QuizPage::new("quiz-1");
    page.mount(&api, &store).await;

    let session = page.state().ready().unwrap();
    let ids: Vec<&str> = session.questions().iter().map(|q| q.id.as_str()).collect();
    assert_eq!(ids, vec!["q1", "q2"]);
}

#[tokio::test]
async fn quiz_without_questions_shows_error() {
    let store = MemoryStore::new();
    let api = MockApi::new().with_quiz(quiz("quiz-1", &["q1"]));
    let mut page = QuizPage::new("quiz-1");
    page.mount(&api, &store).await;

    assert_eq!(page.state().error(), Some(NO_QUESTIONS));
}

#[tokio::test]
async fn quiz_start_failure_shows_error() {
    let store = MemoryStore::new();
    let api = MockApi::new();
    let mut page = QuizPage::new("missing");
    page.mount(&api, &store).await;

    assert_eq!(page.state().error(), Some("404 Not Found: Quiz not found"));
}

#[tokio::test]
async fn quiz_ignores_submit_without_selection() {
    let store = MemoryStore::new();
    let api = stashed_quiz(&store);
    let mut page = QuizPage::new("quiz-1");
    page.mount(&api, &store).await;
    let session = page.session_mut().unwrap();

    assert!(!session.select("Z"));
    assert_eq!(session.submit(&api).await, None);
    assert_eq!(session.index(), 0);
    assert_eq!(api.call_count("submit_answer"), 0);
}

#[tokio::test]
async fn quiz_advances_only_after_successful_submit() {
    let store = MemoryStore::new();
    let api = stashed_quiz(&store).fail_times("submit_answer", 1, 503, "try again");
    let mut page = QuizPage::new("quiz-1");
    page.mount(&api, &store).await;
    let session = page.session_mut().unwrap();

    assert!(session.select("A"));
    assert_eq!(session.submit(&api).await, None);
    assert_eq!(session.index(), 0);
    assert_eq!(session.selected(), Some("A"));
    assert_eq!(session.error(), Some("503 Service Unavailable: try again"));

    assert_eq!(session.submit(&api).await, None);
    assert_eq!(session.index(), 1);
    assert_eq!(session.selected(), None);
    assert!(session.error().is_none());
}

#[tokio::test]
async fn quiz_goes_to_results_after_last_answer() {
    let store = MemoryStore::new();
    let api = stashed_quiz(&store);
    let mut page = QuizPage::new("quiz-1");
    page.mount(&api, &store).await;
    let session = page.session_mut().unwrap();

    session.select("A");
    assert_eq!(session.submit(&api).await, None);
    assert!(session.is_last());
    session.select("D");
    assert_eq!(
        session.submit(&api).await,
        Some(Route::Results("quiz-1".into()))
    );
    assert!(session.is_finished());

    let answers = api.submitted_answers();
    assert_eq!(answers.len(), 2);
    assert_eq!(answers[0].1.question_id, "q1");
    assert_eq!(answers[1].1.selected_answer, "D");
}

// --- Results ---

#[tokio::test]
async fn results_page_shows_score() {
    let store = MemoryStore::new();
    let api = stashed_quiz(&store);
    let mut quiz_page = QuizPage::new("quiz-1");
    quiz_page.mount(&api, &store).await;
    let session = quiz_page.session_mut().unwrap();
    session.select("A");
    session.submit(&api).await;
    session.select("D");
    session.submit(&api).await;

    let mut page = ResultsPage::new("quiz-1");
    page.mount(&api).await;

    let results = page.state().ready().unwrap();
    assert_eq!(results.correct_answers, 1);
    assert_eq!(results.total_questions, 2);
    assert_eq!(results.percentage(), "50.0%");
    assert_eq!(results.summary(), "1 out of 2 correct");
    assert_eq!(api.quiz("quiz-1").unwrap().status, QuizStatus::Completed);
}

#[tokio::test]
async fn results_failure_shows_error() {
    let api = MockApi::new().fail("finish_quiz", 400, "Quiz is not in progress");
    let mut page = ResultsPage::new("quiz-1");
    page.mount(&api).await;

    assert_eq!(
        page.state().error(),
        Some("400 Bad Request: Quiz is not in progress")
    );
}
