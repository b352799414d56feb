//! Page export ("Save As")
//!
//! The engine serialises asynchronously. The destination is captured when the
//! export starts, so the callback writes to that path even if the user has
//! switched tabs or started another export in the meantime.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use silk_tabs::Engine;

use crate::error::CoreError;
use crate::presenter::Presenter;
use crate::Result;

const EXPORT_FAILED_TITLE: &str = "Save Failed";

/// Write serialised markup to `path`, replacing any existing file
pub fn write_document(path: &Path, markup: &str) -> Result<()> {
    std::fs::write(path, markup.as_bytes()).map_err(|source| CoreError::Export {
        path: path.to_path_buf(),
        source,
    })
}

pub struct PageExporter {
    presenter: Arc<dyn Presenter>,
}

impl PageExporter {
    pub fn new(presenter: Arc<dyn Presenter>) -> Self {
        Self { presenter }
    }

    /// Ask `engine` for its document and write it to `destination` once ready
    pub fn export(&self, engine: &dyn Engine, destination: PathBuf) {
        let presenter = Arc::clone(&self.presenter);

        tracing::debug!(path = %destination.display(), "Serialising page");

        engine.serialize_document(Box::new(move |document| {
            let saved = document
                .map_err(CoreError::from)
                .and_then(|markup| write_document(&destination, &markup).map(|()| markup.len()));

            match saved {
                Ok(bytes) => tracing::info!(path = %destination.display(), bytes, "Saved page"),
                Err(e) => {
                    tracing::error!(path = %destination.display(), error = %e, "Failed to save page");
                    presenter.show_error(EXPORT_FAILED_TITLE, &e.to_string());
                }
            }
        }));
    }
}

impl Clone for PageExporter {
    fn clone(&self) -> Self {
        Self {
            presenter: Arc::clone(&self.presenter),
        }
    }
}
