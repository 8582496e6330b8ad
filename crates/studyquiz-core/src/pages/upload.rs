//! Document upload form.

use crate::model::FileUpload;
use crate::traits::QuizApi;

use super::{error_text, Route};

pub const NO_FILE_SELECTED: &str = "Please select a file";
pub const FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed. Please upload PDF or PPT files.";

/// Holds a single selected file and uploads it on submit.
#[derive(Debug, Clone, Default)]
pub struct UploadPage {
    selected: Option<FileUpload>,
    uploading: bool,
    error: Option<String>,
}

impl UploadPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&FileUpload> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_uploading(&self) -> bool {
        self.uploading
    }

    /// Choose the file to upload. Only PDF and PowerPoint files are taken.
    pub fn select(&mut self, upload: FileUpload) -> bool {
        if !upload.is_allowed_type() {
            self.error = Some(FILE_TYPE_NOT_ALLOWED.to_string());
            return false;
        }
        self.selected = Some(upload);
        self.error = None;
        true
    }

    pub async fn submit(&mut self, api: &dyn QuizApi) -> Option<Route> {
        let Some(upload) = self.selected.as_ref() else {
            self.error = Some(NO_FILE_SELECTED.to_string());
            return None;
        };

        self.uploading = true;
        self.error = None;
        let outcome = api.upload_file(upload).await;
        self.uploading = false;

        match outcome {
            Ok(file) => {
                tracing::info!(file_id = %file.id, filename = %file.filename, "uploaded");
                Some(Route::Dashboard)
            }
            Err(e) => {
                self.error = Some(error_text(&e, "Upload failed"));
                None
            }
        }
    }
}
