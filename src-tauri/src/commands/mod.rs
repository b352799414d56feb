//! Tauri IPC Commands
//!
//! These commands bridge the toolbar webview to the browser session.

#[cfg(test)]
mod acl;
pub mod export;
pub mod history;
pub mod navigation;
pub mod tabs;

use serde::Serialize;

pub fn ui_webview_label(window_label: &str) -> String {
    format!("ui-{window_label}")
}

#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}
