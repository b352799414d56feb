//! Tab error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabError {
    #[error("Tab not found: {0}")]
    NotFound(String),

    #[error("Tab index {index} out of range ({count} tabs)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error("Engine error: {0}")]
    Engine(String),

    #[error("Document unavailable: {0}")]
    DocumentUnavailable(String),
}
