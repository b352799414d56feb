//! Toolbar navigation commands
use tauri::State;

use super::tabs::BrowserView;
use super::CommandResult;
use crate::state::AppState;

/// Enter pressed in the address bar
#[tauri::command]
pub fn navigate(state: State<AppState>, input: String) -> CommandResult<BrowserView> {
    let browser = state.browser();
    if let Some(url) = browser.navigate(&input) {
        tracing::debug!(url = %url, "Address bar navigation");
    }
    CommandResult::ok(browser.into())
}

#[tauri::command]
pub fn go_back(state: State<AppState>) -> CommandResult<()> {
    state.browser().go_back();
    CommandResult::ok(())
}

#[tauri::command]
pub fn go_forward(state: State<AppState>) -> CommandResult<()> {
    state.browser().go_forward();
    CommandResult::ok(())
}

#[tauri::command]
pub fn reload(state: State<AppState>) -> CommandResult<()> {
    state.browser().reload();
    CommandResult::ok(())
}
