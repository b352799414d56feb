//! Silk Core
//!
//! Session state for the Silk browser shell: tabs, address bar, history,
//! download decisions and page export. Rendering and networking belong to the
//! engine behind [`Engine`]; dialogs belong to the [`Presenter`].

mod browser;
mod config;
mod connectivity;
mod error;
mod exporter;
mod presenter;

pub use browser::Browser;
pub use config::Config;
pub use connectivity::{
    gate_startup, ConnectivityCheck, ConnectivityError, TcpTransport, Transport,
    EXIT_NO_CONNECTION, NO_CONNECTION_MESSAGE, NO_CONNECTION_TITLE,
};
pub use error::CoreError;
pub use exporter::{write_document, PageExporter};
pub use presenter::Presenter;

// Re-export core components
pub use silk_download::{
    Answer, CancelReason, DownloadItem, DownloadMediator, DownloadOutcome, FileFilter,
    MessageLevel, Prompter, Question, SavePrompt,
};
pub use silk_navigation::{resolve_input, HistoryEntry, HistoryTracker};
pub use silk_tabs::{
    DocumentCallback, Engine, EngineEvents, EngineFactory, TabError, TabHandle, TabSummary,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
