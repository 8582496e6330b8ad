//! studyquiz-client — talks to the quiz service.
//!
//! Implements the `QuizApi` trait over HTTP with a durable token store, and
//! provides an in-process mock for tests.

pub mod api;
pub mod config;
pub mod mock;

pub use api::ApiClient;
pub use config::{load_config, load_config_from, StudyquizConfig};
pub use mock::MockApi;
