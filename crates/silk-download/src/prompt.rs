//! User prompts needed while resolving a download
//!
//! Implemented by the presentation layer. Prompts are synchronous: the
//! caller waits for the user's answer.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

/// A yes/no question.
///
/// Anything but an explicit Yes counts as No. Which button holds keyboard
/// focus is up to the platform dialog.
#[derive(Debug, Clone)]
pub struct Question {
    pub title: String,
    pub message: String,
    pub level: MessageLevel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    /// Closed without choosing a button
    Dismissed,
}

impl Answer {
    /// Only an explicit Yes counts as consent.
    pub fn is_yes(self) -> bool {
        self == Answer::Yes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    /// Extensions without the leading dot; `*` matches anything
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn new(name: &str, extensions: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
        }
    }

    pub fn html() -> Self {
        Self::new("HTML Files", &["html"])
    }

    pub fn all_files() -> Self {
        Self::new("All Files", &["*"])
    }
}

/// A save-file dialog request
#[derive(Debug, Clone)]
pub struct SavePrompt {
    pub title: String,
    /// Pre-filled file name; empty for none
    pub suggested_name: String,
    pub filters: Vec<FileFilter>,
}

pub trait Prompter: Send + Sync {
    fn ask(&self, question: &Question) -> Answer;

    /// Returns `None` when the user cancels the dialog.
    fn choose_save_path(&self, prompt: &SavePrompt) -> Option<PathBuf>;
}
