//! One module per subcommand. Each drives the matching page.

pub mod auth;
pub mod dashboard;
pub mod files;
pub mod generate;
pub mod home;
pub mod init;
pub mod results;
pub mod ruleset;
pub mod take;
pub mod upload;

use std::path::Path;

use anyhow::Result;

use studyquiz_client::{load_config, load_config_from, ApiClient};
use studyquiz_core::Route;

/// Load configuration and build a client over the durable store.
pub fn connect(config_path: Option<&Path>) -> Result<ApiClient> {
    let config = match config_path {
        Some(path) => load_config_from(Some(path))?,
        None => load_config()?,
    };
    tracing::debug!(
        api_url = %config.api_url,
        storage = %config.storage_path().display(),
        "using quiz service"
    );
    config.client()
}

/// The command that opens `route`.
pub fn command_for(route: &Route) -> String {
    match route {
        Route::Home => "studyquiz home".to_string(),
        Route::Signup => "studyquiz signup --email <email> --password <password>".to_string(),
        Route::Login => "studyquiz login --email <email> --password <password>".to_string(),
        Route::Dashboard => "studyquiz dashboard".to_string(),
        Route::Upload => "studyquiz upload <path>".to_string(),
        Route::CreateRuleset => "studyquiz ruleset create --name <name>".to_string(),
        Route::GenerateQuiz => {
            "studyquiz generate --file <file-id> --ruleset <ruleset-id>".to_string()
        }
        Route::TakeQuiz(id) => format!("studyquiz take {id}"),
        Route::Results(id) => format!("studyquiz results {id}"),
    }
}

/// Turn a page's error message into a command failure.
pub fn page_failure(message: Option<&str>, fallback: &str) -> anyhow::Error {
    anyhow::anyhow!("{}", message.unwrap_or(fallback))
}
