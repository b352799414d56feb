//! History commands
use tauri::State;

use super::CommandResult;
use crate::state::AppState;

/// Settings > Show History
#[tauri::command]
pub fn show_history(state: State<AppState>) -> CommandResult<()> {
    state.browser().show_history();
    CommandResult::ok(())
}

#[tauri::command]
pub fn get_history(state: State<AppState>) -> CommandResult<Vec<String>> {
    CommandResult::ok(state.browser().history_list())
}
