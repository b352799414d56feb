//! Native dialogs
//!
//! Blocking `rfd` dialogs. Callers are Tauri sync commands and webview
//! callbacks, both of which run on the main thread.

use rfd::{FileDialog, MessageButtons, MessageDialog, MessageDialogResult};
use silk_core::{Answer, MessageLevel, Presenter, Prompter, Question, SavePrompt};
use std::path::PathBuf;

#[derive(Debug, Default, Clone, Copy)]
pub struct DialogPresenter;

impl DialogPresenter {
    pub fn new() -> Self {
        Self
    }
}

fn level(level: MessageLevel) -> rfd::MessageLevel {
    match level {
        MessageLevel::Info => rfd::MessageLevel::Info,
        MessageLevel::Warning => rfd::MessageLevel::Warning,
        MessageLevel::Error => rfd::MessageLevel::Error,
    }
}

/// Only the Yes button answers Yes. Closing the dialog, or a backend that
/// reports some other result, never does.
fn answer(result: MessageDialogResult) -> Answer {
    match result {
        MessageDialogResult::Yes => Answer::Yes,
        MessageDialogResult::No => Answer::No,
        _ => Answer::Dismissed,
    }
}

impl Prompter for DialogPresenter {
    fn ask(&self, question: &Question) -> Answer {
        let result = MessageDialog::new()
            .set_title(&question.title)
            .set_description(&question.message)
            .set_level(level(question.level))
            .set_buttons(MessageButtons::YesNo)
            .show();

        answer(result)
    }

    fn choose_save_path(&self, prompt: &SavePrompt) -> Option<PathBuf> {
        let mut dialog = FileDialog::new().set_title(&prompt.title);

        if !prompt.suggested_name.is_empty() {
            dialog = dialog.set_file_name(&prompt.suggested_name);
        }

        for filter in &prompt.filters {
            dialog = dialog.add_filter(&filter.name, filter.extensions.as_slice());
        }

        dialog.save_file()
    }
}

impl Presenter for DialogPresenter {
    fn show_error(&self, title: &str, message: &str) {
        MessageDialog::new()
            .set_title(title)
            .set_description(message)
            .set_level(rfd::MessageLevel::Error)
            .set_buttons(MessageButtons::Ok)
            .show();
    }

    fn show_list(&self, title: &str, items: &[String]) {
        let description = if items.is_empty() {
            "Nothing here yet.".to_string()
        } else {
            items.join("\n")
        };

        MessageDialog::new()
            .set_title(title)
            .set_description(description)
            .set_level(rfd::MessageLevel::Info)
            .set_buttons(MessageButtons::Ok)
            .show();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_yes_consents() {
        assert_eq!(answer(MessageDialogResult::Yes), Answer::Yes);
        assert_eq!(answer(MessageDialogResult::No), Answer::No);

        for other in [
            MessageDialogResult::Ok,
            MessageDialogResult::Cancel,
            MessageDialogResult::Custom("Yes".to_string()),
        ] {
            assert_eq!(answer(other), Answer::Dismissed);
        }
    }
}
