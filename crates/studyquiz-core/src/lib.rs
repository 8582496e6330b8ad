//! studyquiz-core — data model, traits, and page state machines.
//!
//! This crate defines the records exchanged with the quiz service, the
//! `QuizApi` seam the client implements, durable key/value storage, and the
//! pages that drive a user through uploading, generating, and taking quizzes.

pub mod error;
pub mod model;
pub mod pages;
pub mod storage;
pub mod traits;

pub use error::ApiError;
pub use pages::{PageState, Route};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
pub use traits::QuizApi;
