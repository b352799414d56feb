//! Download mediator
//!
//! Resolves each offered download synchronously: confirm, pick a
//! destination, then tell the engine to accept or cancel.

use std::sync::Arc;

use crate::prompt::{Answer, FileFilter, MessageLevel, Prompter, Question, SavePrompt};
use crate::request::{CancelReason, DownloadItem, DownloadOutcome, DownloadRequest};

pub struct DownloadMediator {
    prompter: Arc<dyn Prompter>,
}

impl DownloadMediator {
    pub fn new(prompter: Arc<dyn Prompter>) -> Self {
        Self { prompter }
    }

    /// Handle a download offered by an engine instance
    pub fn download_requested(&self, item: Box<dyn DownloadItem>) -> DownloadOutcome {
        let mut request = DownloadRequest::new(item);

        tracing::info!(
            download_id = %request.id,
            url = %request.url,
            file_name = %request.file_name,
            "Download offered"
        );

        if request.prompt().is_err() {
            return request.cancel(CancelReason::Declined);
        }

        let answer = self.prompter.ask(&confirmation(&request.file_name));
        if !answer.is_yes() {
            tracing::debug!(download_id = %request.id, answer = ?answer, "Download not confirmed");
            return request.cancel(CancelReason::Declined);
        }

        let prompt = SavePrompt {
            title: "Save File".to_string(),
            suggested_name: request.file_name.clone(),
            filters: vec![FileFilter::all_files()],
        };

        match self.prompter.choose_save_path(&prompt) {
            Some(destination) => match request.accept(destination) {
                Ok(outcome) => outcome,
                Err(e) => {
                    // accept() has already cancelled on the engine side
                    tracing::error!(error = %e, "Download could not be accepted");
                    DownloadOutcome::Cancelled(CancelReason::Declined)
                }
            },
            None => request.cancel(CancelReason::NoDestination),
        }
    }

    /// Cancel a download that arrived for a tab which no longer exists
    pub fn reject_orphan(item: Box<dyn DownloadItem>) -> DownloadOutcome {
        DownloadRequest::new(item).cancel(CancelReason::TabClosed)
    }
}

impl Clone for DownloadMediator {
    fn clone(&self) -> Self {
        Self {
            prompter: Arc::clone(&self.prompter),
        }
    }
}

fn confirmation(file_name: &str) -> Question {
    Question {
        title: "Download Confirmation".to_string(),
        message: format!("Are you sure you want to download this file? {file_name}"),
        level: MessageLevel::Warning,
    }
}
