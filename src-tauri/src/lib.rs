//! Silk Browser - Tauri Application
//!
//! One window holding the toolbar webview and, laid over it below the
//! toolbar, one child webview per tab. All session state lives in
//! `silk-core`.

mod commands;
mod dialogs;
mod engine;
mod state;

use std::sync::Arc;

use dialogs::DialogPresenter;
use engine::{DocumentRequests, WebviewFactory};
use silk_core::{
    gate_startup, Browser, Config, ConnectivityCheck, Presenter, EXIT_NO_CONNECTION,
    NO_CONNECTION_MESSAGE, NO_CONNECTION_TITLE,
};
use state::AppState;
use tauri::webview::WebviewBuilder;
use tauri::window::WindowBuilder;
use tauri::{LogicalPosition, LogicalSize, Manager, WebviewUrl, WindowEvent};

const MAIN_WINDOW: &str = "main";

/// Check connectivity, then run the browser until its window closes.
///
/// Returns the process exit status.
pub fn run() -> i32 {
    // Initialize logging
    silk_core::init_logging();

    let config = Config::load();
    let presenter = Arc::new(DialogPresenter::new());

    let check = match ConnectivityCheck::from_config(&config) {
        Ok(check) => check,
        Err(e) => {
            tracing::error!(error = %e, "Cannot probe connectivity");
            presenter.show_error(NO_CONNECTION_TITLE, NO_CONNECTION_MESSAGE);
            return EXIT_NO_CONNECTION;
        }
    };

    gate_startup(&check, presenter.as_ref(), || start(config, presenter.clone()))
}

fn start(config: Config, presenter: Arc<DialogPresenter>) -> tauri::Result<()> {
    tauri::Builder::default()
        .setup(move |app| {
            let window = WindowBuilder::new(app, MAIN_WINDOW)
                .title(&config.window_title)
                .inner_size(config.window_width, config.window_height)
                .min_inner_size(640.0, 360.0)
                .center()
                .build()?;

            let ui_webview = WebviewBuilder::new(
                commands::ui_webview_label(MAIN_WINDOW),
                WebviewUrl::App("index.html".into()),
            )
            .auto_resize();

            let ui_webview = window.add_child(
                ui_webview,
                LogicalPosition::new(0.0, 0.0),
                LogicalSize::new(config.window_width, config.window_height),
            )?;
            let _ = ui_webview.show();

            let documents = DocumentRequests::new();
            let factory = WebviewFactory::new(app.handle().clone(), MAIN_WINDOW, documents.clone());
            let browser = Browser::new(&config, Arc::new(factory), presenter.clone());

            // Start with one tab (blank page)
            browser.open_tab()?;

            app.manage(AppState::new(browser, documents));

            tracing::info!("Silk Browser started");

            Ok(())
        })
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                if window.label() == MAIN_WINDOW {
                    if let Some(state) = window.try_state::<AppState>() {
                        state.browser().shutdown();
                    }
                }
            }
        })
        .invoke_handler(tauri::generate_handler![
            // Tab commands
            commands::tabs::browser_state,
            commands::tabs::new_tab,
            commands::tabs::activate_tab,
            commands::tabs::close_tab,
            // Navigation commands
            commands::navigation::navigate,
            commands::navigation::go_back,
            commands::navigation::go_forward,
            commands::navigation::reload,
            // History commands
            commands::history::show_history,
            commands::history::get_history,
            // Save As
            commands::export::save_page_as,
            commands::export::page_serialized,
        ])
        .run(tauri::generate_context!())
}
