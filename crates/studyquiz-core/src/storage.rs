//! Durable key/value storage for client-side state.
//!
//! Holds the bearer token and the per-quiz question stash. Values are plain
//! strings; structured values are stored as JSON text.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::model::Question;

/// Storage key of the bearer token.
pub const TOKEN_KEY: &str = "auth_token";

/// Storage key of the question list stashed for a quiz.
pub fn question_stash_key(quiz_id: &str) -> String {
    format!("quiz_questions_{quiz_id}")
}

/// Errors raised by a [`KeyValueStore`].
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt storage file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String key/value storage that survives across runs.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store. Nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> T) -> T {
        let mut guard = self
            .entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        f(&mut guard)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.with_entries(|e| e.get(key).cloned()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.with_entries(|e| e.insert(key.to_string(), value.to_string()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.with_entries(|e| e.remove(key));
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every mutation rewrites the whole file through a temporary sibling and a
/// rename, so a crash never leaves a half-written file behind. A missing file
/// reads as an empty store.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(StorageError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|source| StorageError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let io_err = |source| StorageError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let json = serde_json::to_string_pretty(entries).map_err(|source| {
            StorageError::Encode {
                key: self.path.display().to_string(),
                source,
            }
        })?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(io_err)?;
        std::fs::rename(&tmp, &self.path).map_err(io_err)?;
        Ok(())
    }

    fn update(
        &self,
        f: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        let mut entries = self.load()?;
        if f(&mut entries) {
            self.save(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|e| {
            e.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|e| e.remove(key).is_some())
    }
}

/// Save the generated questions for `quiz_id` so the quiz page can find them.
pub fn stash_questions(
    store: &dyn KeyValueStore,
    quiz_id: &str,
    questions: &[Question],
) -> Result<(), StorageError> {
    let key = question_stash_key(quiz_id);
    let json = serde_json::to_string(questions).map_err(|source| StorageError::Encode {
        key: key.clone(),
        source,
    })?;
    store.set(&key, &json)
}

/// Read back stashed questions. Undecodable entries read as absent.
pub fn stashed_questions(
    store: &dyn KeyValueStore,
    quiz_id: &str,
) -> Result<Option<Vec<Question>>, StorageError> {
    let Some(raw) = store.get(&question_stash_key(quiz_id))? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(questions) => Ok(Some(questions)),
        Err(e) => {
            tracing::warn!(quiz_id, error = %e, "ignoring undecodable question stash");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AnswerOption;

    fn question(id: &str) -> Question {
        Question {
            id: id.into(),
            question_text: format!("Question {id}?"),
            options: vec![AnswerOption::Text("yes".into()), AnswerOption::Text("no".into())],
            answer: None,
            difficulty: None,
            bloom_level: None,
            topic: None,
        }
    }

    #[test]
    fn memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.set(TOKEN_KEY, "abc").unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap().as_deref(), Some("abc"));
        store.remove(TOKEN_KEY).unwrap();
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state").join("storage.json");

        let store = FileStore::new(&path);
        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        store.set(TOKEN_KEY, "tok-1").unwrap();
        store.set("other", "value").unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.get(TOKEN_KEY).unwrap().as_deref(), Some("tok-1"));
        reopened.remove(TOKEN_KEY).unwrap();

        assert_eq!(store.get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.get("other").unwrap().as_deref(), Some("value"));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::new(&path).get(TOKEN_KEY).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt { .. }));
    }

    #[test]
    fn question_stash_round_trip() {
        let store = MemoryStore::new();
        assert!(stashed_questions(&store, "quiz-1").unwrap().is_none());

        stash_questions(&store, "quiz-1", &[question("a"), question("b")]).unwrap();
        let raw = store.get("quiz_questions_quiz-1").unwrap().unwrap();
        assert!(raw.starts_with('['));

        let loaded = stashed_questions(&store, "quiz-1").unwrap().unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[1].id, "b");
        assert!(stashed_questions(&store, "quiz-2").unwrap().is_none());
    }

    #[test]
    fn undecodable_stash_reads_as_absent() {
        let store = MemoryStore::new();
        store.set(&question_stash_key("q"), "{broken").unwrap();
        assert!(stashed_questions(&store, "q").unwrap().is_none());
    }
}
