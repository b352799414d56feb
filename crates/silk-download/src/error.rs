//! Download error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Invalid download state transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
