//! Dialogs the session needs beyond the download prompts

use silk_download::Prompter;

pub trait Presenter: Prompter {
    /// Blocking error message
    fn show_error(&self, title: &str, message: &str);

    /// Read-only list, e.g. the browsing history
    fn show_list(&self, title: &str, items: &[String]);
}
