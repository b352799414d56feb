//! Tab strip commands
use serde::Serialize;
use silk_core::{Browser, TabSummary};
use tauri::State;

use super::CommandResult;
use crate::state::AppState;

/// Everything the toolbar webview draws
#[derive(Debug, Serialize)]
pub struct BrowserView {
    pub tabs: Vec<TabSummary>,
    pub address_bar: String,
}

impl From<&Browser> for BrowserView {
    fn from(browser: &Browser) -> Self {
        Self {
            tabs: browser.tabs(),
            address_bar: browser.address_bar(),
        }
    }
}

#[tauri::command]
pub fn browser_state(state: State<AppState>) -> CommandResult<BrowserView> {
    CommandResult::ok(state.browser().into())
}

#[tauri::command]
pub fn new_tab(state: State<AppState>) -> CommandResult<BrowserView> {
    let browser = state.browser();
    match browser.open_tab() {
        Ok(_) => CommandResult::ok(browser.into()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub fn activate_tab(state: State<AppState>, index: usize) -> CommandResult<BrowserView> {
    let browser = state.browser();
    match browser.set_active(index) {
        Ok(_) => CommandResult::ok(browser.into()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

#[tauri::command]
pub fn close_tab(state: State<AppState>, index: usize) -> CommandResult<BrowserView> {
    let browser = state.browser();
    match browser.close_tab(index) {
        Ok(_) => CommandResult::ok(browser.into()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}
