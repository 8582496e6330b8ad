//! Client configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use studyquiz_core::FileStore;

use crate::api::{ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Environment variable overriding `api_url`.
pub const API_URL_ENV: &str = "STUDYQUIZ_API_URL";
/// Environment variable overriding `state_dir`.
pub const STATE_DIR_ENV: &str = "STUDYQUIZ_STATE_DIR";

const STORAGE_FILE: &str = "storage.json";

/// Top-level studyquiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyquizConfig {
    /// Base URL of the quiz service API.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Where the token and question stashes are kept.
    #[serde(default)]
    pub state_dir: Option<PathBuf>,
    /// Request timeout in seconds; 0 disables it.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_api_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_timeout() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for StudyquizConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            state_dir: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl StudyquizConfig {
    /// The configured state directory, or the per-user default.
    pub fn state_dir(&self) -> PathBuf {
        self.state_dir.clone().unwrap_or_else(default_state_dir)
    }

    /// Path of the durable key/value store.
    pub fn storage_path(&self) -> PathBuf {
        self.state_dir().join(STORAGE_FILE)
    }

    /// Build an API client backed by the durable store.
    pub fn client(&self) -> Result<ApiClient> {
        let store = Arc::new(FileStore::new(self.storage_path()));
        tracing::debug!(path = %store.path().display(), "opening state store");
        ApiClient::with_timeout(&self.api_url, store, self.timeout_secs)
            .context("failed to build HTTP client")
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    let mut from = 0;
    while let Some(offset) = result[from..].find("${") {
        let start = from + offset;
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
            // Substituted text is not expanded again.
            from = start + value.len();
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `studyquiz.toml` in the current directory
/// 2. `~/.config/studyquiz/config.toml`
///
/// Environment variable overrides: `STUDYQUIZ_API_URL`, `STUDYQUIZ_STATE_DIR`.
pub fn load_config() -> Result<StudyquizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<StudyquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("studyquiz.toml");
        if local.exists() {
            Some(local)
        } else {
            config_dir()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<StudyquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => StudyquizConfig::default(),
    };

    Ok(finalize(config, |name| std::env::var(name).ok()))
}

/// Apply environment overrides, expand `${VAR}` references, and normalize
/// the base URL.
fn finalize(
    mut config: StudyquizConfig,
    env: impl Fn(&str) -> Option<String>,
) -> StudyquizConfig {
    if let Some(url) = env(API_URL_ENV).filter(|v| !v.is_empty()) {
        config.api_url = url;
    }
    if let Some(dir) = env(STATE_DIR_ENV).filter(|v| !v.is_empty()) {
        config.state_dir = Some(PathBuf::from(dir));
    }

    config.api_url = resolve_env_vars(&config.api_url)
        .trim_end_matches('/')
        .to_string();
    config.state_dir = config
        .state_dir
        .map(|dir| PathBuf::from(resolve_env_vars(&dir.to_string_lossy())));
    config
}

fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

fn config_dir() -> Option<PathBuf> {
    home_dir().map(|h| h.join(".config").join("studyquiz"))
}

fn default_state_dir() -> PathBuf {
    home_dir()
        .map(|h| h.join(".local").join("share").join("studyquiz"))
        .unwrap_or_else(|| PathBuf::from(".studyquiz"))
}
