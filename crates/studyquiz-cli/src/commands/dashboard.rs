//! The `studyquiz dashboard` command.

use std::path::Path;

use anyhow::Result;

use studyquiz_core::pages::{DashboardPage, NAV_CARDS};

use super::files::files_table;
use super::{command_for, connect, page_failure};

pub async fn execute(config: Option<&Path>) -> Result<()> {
    let api = connect(config)?;
    let mut page = DashboardPage::new();

    if let Some(route) = page.mount(&api).await {
        let err = page_failure(page.state().error(), "Failed to load dashboard");
        return Err(err.context(format!("sign in first: {}", command_for(&route))));
    }
    let Some(view) = page.state().ready() else {
        return Err(page_failure(page.state().error(), "Failed to load dashboard"));
    };

    println!("{}\n", view.greeting());

    for card in &NAV_CARDS {
        println!("  {:<16} {}", card.title, card.description);
        println!("  {:<16} {}", "", command_for(&card.route));
    }

    println!("\nYour Files");
    if view.files.is_empty() {
        println!("No files uploaded yet. Run: studyquiz upload <path>");
    } else {
        println!("{}", files_table(&view.files));
    }

    Ok(())
}
