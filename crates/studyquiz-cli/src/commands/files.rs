//! The `studyquiz files` commands.

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};

use studyquiz_core::model::FileRecord;
use studyquiz_core::QuizApi;

use super::connect;

/// Render documents as a table, newest first as the service returns them.
pub fn files_table(files: &[FileRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Filename", "Status", "Uploaded", "Error"]);

    for file in files {
        let uploaded = file
            .uploaded_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| file.uploaded_at.clone());
        table.add_row(vec![
            Cell::new(&file.id),
            Cell::new(&file.filename),
            Cell::new(file.status),
            Cell::new(uploaded),
            Cell::new(file.failure_message().unwrap_or("")),
        ]);
    }

    table
}

pub async fn list(config: Option<&Path>) -> Result<()> {
    let api = connect(config)?;
    let files = api.list_files().await?;

    if files.is_empty() {
        println!("No files uploaded yet.");
    } else {
        println!("{}", files_table(&files));
    }
    Ok(())
}

pub async fn status(config: Option<&Path>, file_id: &str) -> Result<()> {
    let api = connect(config)?;
    let file = api.file_status(file_id).await?;

    println!("{}: {}", file.filename, file.status);
    if let Some(message) = file.failure_message() {
        println!("  {message}");
    }
    if file.is_ready() {
        println!(
            "Ready for quiz generation: studyquiz generate --file {} --ruleset <ruleset-id>",
            file.id
        );
    }
    Ok(())
}

pub async fn delete(config: Option<&Path>, file_id: &str) -> Result<()> {
    let api = connect(config)?;
    api.delete_file(file_id).await?;
    println!("Deleted file {file_id}");
    Ok(())
}
