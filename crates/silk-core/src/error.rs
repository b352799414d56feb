//! Core error types

use std::path::PathBuf;
use thiserror::Error;

use crate::connectivity::ConnectivityError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Tab error: {0}")]
    Tab(#[from] silk_tabs::TabError),

    #[error(transparent)]
    Connectivity(#[from] ConnectivityError),

    #[error("Could not write {path}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
