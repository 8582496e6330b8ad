//! The `studyquiz init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("studyquiz.toml").exists() {
        println!("studyquiz.toml already exists, skipping.");
    } else {
        std::fs::write("studyquiz.toml", SAMPLE_CONFIG)?;
        println!("Created studyquiz.toml");
    }

    println!("\nNext steps:");
    println!("  1. Point api_url at your quiz service");
    println!("  2. Run: studyquiz signup --email <email> --password <password>");
    println!("  3. Run: studyquiz login --email <email> --password <password>");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# studyquiz configuration

# Base URL of the quiz service API. STUDYQUIZ_API_URL overrides it.
api_url = "http://localhost:8000/api"

# Where the access token and generated questions are kept.
# STUDYQUIZ_STATE_DIR overrides it.
# state_dir = "${HOME}/.local/share/studyquiz"

# Request timeout in seconds; 0 disables it.
timeout_secs = 60
"#;
