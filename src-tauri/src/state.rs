//! Application state management
use silk_core::Browser;

use crate::engine::DocumentRequests;

/// Session plus the serialisation requests still in flight
pub struct AppState {
    browser: Browser,
    documents: DocumentRequests,
}

impl AppState {
    pub fn new(browser: Browser, documents: DocumentRequests) -> Self {
        Self { browser, documents }
    }

    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    pub fn documents(&self) -> &DocumentRequests {
        &self.documents
    }
}
