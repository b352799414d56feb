//! Silk Download Mediation
//!
//! The engine owns the byte stream. This crate only decides what happens to
//! an offered download:
//! - Explicit user confirmation (default answer is No)
//! - Destination chosen by the user, pre-filled with the suggested name
//! - Exactly one accept or cancel sent back to the engine per request

mod error;
mod mediator;
mod prompt;
mod request;

pub use error::DownloadError;
pub use mediator::DownloadMediator;
pub use prompt::{Answer, FileFilter, MessageLevel, Prompter, Question, SavePrompt};
pub use request::{
    suggested_file_name, CancelReason, DownloadItem, DownloadOutcome, DownloadRequest,
    DownloadState,
};

pub type Result<T> = std::result::Result<T, DownloadError>;
