//! The `studyquiz results` command.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyquiz_core::pages::ResultsPage;
use studyquiz_core::QuizApi;

use super::{command_for, connect, page_failure};

pub async fn execute(config: Option<&Path>, quiz_id: String) -> Result<()> {
    let api = connect(config)?;
    show(&api, &quiz_id, &mut std::io::stdout()).await
}

/// Finish the quiz and print the score with a per-question breakdown.
pub async fn show(api: &dyn QuizApi, quiz_id: &str, out: &mut impl Write) -> Result<()> {
    let mut page = ResultsPage::new(quiz_id);
    page.mount(api).await;
    let Some(results) = page.state().ready() else {
        return Err(page_failure(page.state().error(), "Failed to load results"));
    };

    writeln!(out, "\nQuiz Results")?;
    writeln!(out, "Score: {}", results.percentage())?;
    writeln!(out, "{}", results.summary())?;
    if let Some(minutes) = results.time_taken {
        writeln!(out, "Time taken: {minutes} min")?;
    }

    if !results.answers.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Question", "Your answer", "Correct answer", "Result"]);
        for answer in &results.answers {
            table.add_row(vec![
                Cell::new(&answer.question_id),
                Cell::new(&answer.selected_answer),
                Cell::new(if answer.is_correct {
                    ""
                } else {
                    answer.correct_answer.as_deref().unwrap_or("-")
                }),
                Cell::new(if answer.is_correct { "correct" } else { "wrong" }),
            ]);
        }
        writeln!(out, "{table}")?;
    }

    writeln!(
        out,
        "\nBack to dashboard: {}",
        command_for(&studyquiz_core::Route::Dashboard)
    )?;
    Ok(())
}
