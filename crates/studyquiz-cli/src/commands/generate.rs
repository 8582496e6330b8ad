//! The `studyquiz generate` command.

use std::path::Path;

use anyhow::Result;

use studyquiz_core::pages::GeneratePage;
use studyquiz_core::Route;

use super::{command_for, connect, page_failure};

pub async fn execute(
    config: Option<&Path>,
    file_id: String,
    ruleset_id: String,
    topic: Option<String>,
) -> Result<()> {
    let api = connect(config)?;
    let mut page = GeneratePage::new();

    page.mount(&api).await;
    if let Some(message) = page.error() {
        anyhow::bail!("{message}");
    }
    if !page.select_file(&file_id) || !page.select_ruleset(&ruleset_id) {
        return Err(page_failure(page.error(), "Invalid selection"));
    }
    page.topic = topic;

    println!("Generating questions...");
    let Some(route) = page.generate(&api, api.store()).await else {
        return Err(page_failure(page.error(), "Failed to generate quiz"));
    };

    if let Route::TakeQuiz(quiz_id) = &route {
        println!("Quiz created: {quiz_id}");
    }
    println!("Next: {}", command_for(&route));
    Ok(())
}
