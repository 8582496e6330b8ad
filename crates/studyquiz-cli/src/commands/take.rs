//! The `studyquiz take` command: answer a quiz one question at a time.

use std::io::{BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use studyquiz_core::pages::QuizPage;
use studyquiz_core::{KeyValueStore, QuizApi, Route};

use super::{connect, page_failure, results};

pub async fn execute(config: Option<&Path>, quiz_id: String) -> Result<()> {
    let api = connect(config)?;
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();

    let route = run(&api, api.store(), &quiz_id, &mut input, &mut out).await?;
    match route {
        Route::Results(id) => results::show(&api, &id, &mut out).await,
        other => anyhow::bail!("unexpected navigation to {other}"),
    }
}

/// Drive the quiz page from `input` until the last answer is accepted.
pub async fn run(
    api: &dyn QuizApi,
    store: &dyn KeyValueStore,
    quiz_id: &str,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<Route> {
    let mut page = QuizPage::new(quiz_id);
    page.mount(api, store).await;
    if let Some(message) = page.state().error() {
        return Err(page_failure(Some(message), "Failed to start quiz"));
    }
    let session = page.session_mut().context("quiz did not load")?;

    loop {
        let question = session
            .current()
            .cloned()
            .context("quiz has no current question")?;
        let options: Vec<&str> = question.option_texts().collect();

        writeln!(
            out,
            "\n{} ({:.0}%)",
            session.position_label(),
            session.progress_percent()
        )?;
        writeln!(out, "{}", question.question_text)?;
        for (i, option) in options.iter().enumerate() {
            writeln!(out, "  {}. {}", i + 1, option)?;
        }
        let action = if session.is_last() { "finish" } else { "continue" };
        write!(out, "Answer [1-{}] to {action}: ", options.len())?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input ended before the quiz was finished");
        }
        let choice = line.trim();
        // Option text wins over its position, so "4" picks the option "4".
        let answer = if options.contains(&choice) {
            choice
        } else {
            match choice.parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => options[n - 1],
                _ => choice,
            }
        };

        if !session.select(answer) {
            writeln!(out, "Please choose one of the listed options.")?;
            continue;
        }
        if let Some(route) = session.submit(api).await {
            return Ok(route);
        }
        if let Some(message) = session.error() {
            writeln!(out, "Error: {message}. Answer again to retry.")?;
        }
    }
}
