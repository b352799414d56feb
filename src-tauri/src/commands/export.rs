//! Save As commands
use tauri::{State, Webview};

use super::CommandResult;
use crate::state::AppState;

/// Prompt for a destination and save the active page there.
///
/// `data` is `false` when no tab is open or the prompt was cancelled.
#[tauri::command]
pub fn save_page_as(state: State<AppState>) -> CommandResult<bool> {
    CommandResult::ok(state.browser().save_active_page())
}

/// Markup posted back by a content webview after a serialisation request
#[tauri::command]
pub fn page_serialized(
    webview: Webview,
    state: State<AppState>,
    request_id: String,
    html: String,
) -> CommandResult<()> {
    if state
        .documents()
        .complete(webview.label(), &request_id, html)
    {
        CommandResult::ok(())
    } else {
        tracing::warn!(label = %webview.label(), request_id = %request_id, "Unexpected page document");
        CommandResult::err(format!("Unknown request: {request_id}"))
    }
}
