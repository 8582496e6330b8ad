//! The `studyquiz upload` command.

use std::path::{Path, PathBuf};

use anyhow::Result;

use studyquiz_core::model::FileUpload;
use studyquiz_core::pages::UploadPage;

use super::{command_for, connect, page_failure};

pub async fn execute(config: Option<&Path>, path: PathBuf) -> Result<()> {
    let upload = FileUpload::from_path(&path)?;
    let mut page = UploadPage::new();
    if !page.select(upload) {
        return Err(page_failure(page.error(), "File type not allowed"));
    }

    let api = connect(config)?;
    let Some(route) = page.submit(&api).await else {
        return Err(page_failure(page.error(), "Upload failed"));
    };

    println!("Uploaded {}. Processing has started.", path.display());
    println!("Next: {}", command_for(&route));
    Ok(())
}
