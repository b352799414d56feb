//! Webview engine
//!
//! Each tab gets its own child webview within the main window. Page loads,
//! title changes and downloads are forwarded to the session through the
//! tab's [`EngineEvents`].

use parking_lot::Mutex;
use silk_core::{DocumentCallback, DownloadItem, Engine, EngineEvents, EngineFactory, TabError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tauri::webview::{DownloadEvent, PageLoadEvent, WebviewBuilder};
use tauri::{AppHandle, Emitter, LogicalPosition, LogicalSize, Manager, Webview, WebviewUrl};

/// Height of the toolbar and tab strip drawn by the UI webview
pub const CHROME_HEIGHT: f64 = 84.0;

/// Event telling the UI webview to refetch tabs and address bar
pub const BROWSER_UPDATED: &str = "browser-updated";

/// What `about:blank` serialises to
const BLANK_DOCUMENT: &str = "<html><head></head><body></body></html>";

const NAVIGATED_AWAY: &str = "the page navigated away before it could be saved";

fn content_label(tab_id: &str) -> String {
    format!("content-{tab_id}")
}

/// Where a page's markup comes from when it is saved
#[derive(Debug, PartialEq, Eq)]
enum DocumentSource {
    /// Ask the page over IPC; only web origins may call back
    Page,
    Blank,
    Unsupported(String),
}

fn document_source(url: &url::Url) -> DocumentSource {
    match url.scheme() {
        "http" | "https" => DocumentSource::Page,
        "about" if url.path() == "blank" => DocumentSource::Blank,
        _ => DocumentSource::Unsupported(format!("{url} cannot be saved")),
    }
}

struct PendingDocument {
    webview_label: String,
    callback: DocumentCallback,
}

/// Serialisation requests waiting for their page to answer
#[derive(Clone, Default)]
pub struct DocumentRequests {
    pending: Arc<Mutex<HashMap<String, PendingDocument>>>,
}

impl DocumentRequests {
    pub fn new() -> Self {
        Self::default()
    }

    fn register(&self, webview_label: &str, callback: DocumentCallback) -> String {
        let request_id = uuid::Uuid::new_v4().to_string();
        self.pending.lock().insert(
            request_id.clone(),
            PendingDocument {
                webview_label: webview_label.to_string(),
                callback,
            },
        );
        request_id
    }

    fn take(&self, request_id: &str) -> Option<PendingDocument> {
        self.pending.lock().remove(request_id)
    }

    fn take_webview(&self, webview_label: &str) -> Vec<PendingDocument> {
        let mut pending = self.pending.lock();
        let ids: Vec<String> = pending
            .iter()
            .filter(|(_, p)| p.webview_label == webview_label)
            .map(|(id, _)| id.clone())
            .collect();
        ids.iter().filter_map(|id| pending.remove(id)).collect()
    }

    /// Drop every request still waiting on `webview_label` without answering
    fn forget_webview(&self, webview_label: &str) {
        drop(self.take_webview(webview_label));
    }

    /// Fail every request still waiting on `webview_label`.
    ///
    /// A page that starts loading will never answer for the document it
    /// replaced.
    fn fail_webview(&self, webview_label: &str, reason: &str) {
        for pending in self.take_webview(webview_label) {
            (pending.callback)(Err(TabError::DocumentUnavailable(reason.to_string())));
        }
    }

    /// Hand `markup` to the request's callback.
    ///
    /// Only the webview the request was sent to may answer it. Returns
    /// `false` for unknown ids and foreign webviews.
    pub fn complete(&self, webview_label: &str, request_id: &str, markup: String) -> bool {
        let pending = {
            let mut pending = self.pending.lock();
            match pending.get(request_id) {
                Some(p) if p.webview_label == webview_label => pending.remove(request_id),
                _ => None,
            }
        };

        match pending {
            Some(pending) => {
                (pending.callback)(Ok(markup));
                true
            }
            None => false,
        }
    }
}

/// Download offered by a webview, resolved before `on_download` returns
struct WebviewDownload {
    url: String,
    file_name: Option<String>,
    decision: Arc<Mutex<Option<PathBuf>>>,
}

impl DownloadItem for WebviewDownload {
    fn url(&self) -> &str {
        &self.url
    }

    fn suggested_file_name(&self) -> Option<String> {
        self.file_name.clone()
    }

    fn accept(self: Box<Self>, destination: PathBuf) {
        *self.decision.lock() = Some(destination);
    }

    fn cancel(self: Box<Self>) {
        *self.decision.lock() = None;
    }
}

pub struct WebviewEngine {
    webview: Webview,
    documents: DocumentRequests,
}

impl WebviewEngine {
    fn eval(&self, script: &str) {
        if let Err(e) = self.webview.eval(script) {
            tracing::warn!(label = %self.webview.label(), error = %e, "Script failed");
        }
    }
}

impl Engine for WebviewEngine {
    fn load(&self, url: &str) {
        let parsed = match url::Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Engine refused URL");
                return;
            }
        };

        if let Err(e) = self.webview.navigate(parsed) {
            tracing::warn!(url = %url, error = %e, "Navigation failed");
        }
    }

    fn back(&self) {
        self.eval("history.back()");
    }

    fn forward(&self) {
        self.eval("history.forward()");
    }

    fn reload(&self) {
        if let Err(e) = self.webview.reload() {
            tracing::warn!(error = %e, "Reload failed");
        }
    }

    fn current_url(&self) -> String {
        self.webview
            .url()
            .map(|url| url.to_string())
            .unwrap_or_default()
    }

    fn set_visible(&self, visible: bool) {
        let result = if visible {
            self.webview.show()
        } else {
            self.webview.hide()
        };

        if let Err(e) = result {
            tracing::warn!(label = %self.webview.label(), error = %e, "Failed to toggle webview");
        }
    }

    fn serialize_document(&self, on_complete: DocumentCallback) {
        let label = self.webview.label().to_string();

        let url = match self.webview.url() {
            Ok(url) => url,
            Err(e) => {
                on_complete(Err(TabError::DocumentUnavailable(e.to_string())));
                return;
            }
        };

        match document_source(&url) {
            DocumentSource::Page => {}
            DocumentSource::Blank => {
                on_complete(Ok(BLANK_DOCUMENT.to_string()));
                return;
            }
            DocumentSource::Unsupported(reason) => {
                tracing::warn!(label = %label, url = %url, "Page cannot be serialised");
                on_complete(Err(TabError::DocumentUnavailable(reason)));
                return;
            }
        }

        let request_id = self.documents.register(&label, on_complete);

        let script = format!(
            r#"(() => {{
  const html = document.documentElement ? document.documentElement.outerHTML : '';
  window.__TAURI_INTERNALS__.invoke('page_serialized', {{ requestId: '{request_id}', html }});
}})();"#
        );

        if let Err(e) = self.webview.eval(&script) {
            tracing::error!(label = %label, error = %e, "Could not serialise page");
            if let Some(pending) = self.documents.take(&request_id) {
                (pending.callback)(Err(TabError::DocumentUnavailable(e.to_string())));
            }
        }
    }

    fn close(&self) {
        self.documents.forget_webview(self.webview.label());

        if let Err(e) = self.webview.close() {
            tracing::warn!(label = %self.webview.label(), error = %e, "Failed to close webview");
        }
    }
}

/// Builds one child webview per tab inside `window_label`
pub struct WebviewFactory {
    app: AppHandle,
    window_label: String,
    ui_label: String,
    documents: DocumentRequests,
}

impl WebviewFactory {
    pub fn new(app: AppHandle, window_label: &str, documents: DocumentRequests) -> Self {
        Self {
            app,
            window_label: window_label.to_string(),
            ui_label: crate::commands::ui_webview_label(window_label),
            documents,
        }
    }
}

impl EngineFactory for WebviewFactory {
    fn create(
        &self,
        initial_url: &str,
        events: EngineEvents,
    ) -> Result<Arc<dyn Engine>, TabError> {
        let window = self
            .app
            .get_window(&self.window_label)
            .ok_or_else(|| TabError::Engine(format!("Window not found: {}", self.window_label)))?;

        let url = url::Url::parse(initial_url)
            .map_err(|e| TabError::Engine(format!("Invalid URL {initial_url}: {e}")))?;

        let label = content_label(events.tab_id());

        let app_for_load = self.app.clone();
        let ui_for_load = self.ui_label.clone();
        let events_for_load = events.clone();
        let documents_for_load = self.documents.clone();
        let app_for_title = self.app.clone();
        let ui_for_title = self.ui_label.clone();
        let events_for_title = events.clone();
        let events_for_download = events;

        let builder = WebviewBuilder::new(&label, WebviewUrl::External(url))
            .auto_resize()
            .on_page_load(move |webview, payload| {
                if let PageLoadEvent::Started = payload.event() {
                    documents_for_load.fail_webview(webview.label(), NAVIGATED_AWAY);
                }
                // Finished carries the URL after redirects
                events_for_load.url_changed(payload.url().as_str());
                let _ = app_for_load.emit_to(ui_for_load.as_str(), BROWSER_UPDATED, ());
            })
            .on_document_title_changed(move |_webview, title| {
                events_for_title.title_changed(&title);
                let _ = app_for_title.emit_to(ui_for_title.as_str(), BROWSER_UPDATED, ());
            })
            .on_download(move |_webview, event| match event {
                DownloadEvent::Requested { url, destination } => {
                    let decision = Arc::new(Mutex::new(None));
                    let item = WebviewDownload {
                        url: url.to_string(),
                        file_name: destination
                            .file_name()
                            .and_then(|name| name.to_str())
                            .map(str::to_string),
                        decision: Arc::clone(&decision),
                    };

                    events_for_download.download_requested(Box::new(item));

                    let chosen = decision.lock().take();
                    match chosen {
                        Some(path) => {
                            *destination = path;
                            true
                        }
                        None => false,
                    }
                }
                DownloadEvent::Finished { url, path, success } => {
                    tracing::info!(url = %url, path = ?path, success, "Download finished");
                    true
                }
                _ => true,
            });

        let scale = window
            .scale_factor()
            .map_err(|e| TabError::Engine(e.to_string()))?;
        let size = window
            .inner_size()
            .map_err(|e| TabError::Engine(e.to_string()))?
            .to_logical::<f64>(scale);

        let webview = window
            .add_child(
                builder,
                LogicalPosition::new(0.0, CHROME_HEIGHT),
                LogicalSize::new(size.width, (size.height - CHROME_HEIGHT).max(0.0)),
            )
            .map_err(|e| TabError::Engine(format!("Failed to create webview: {e}")))?;

        tracing::info!(label = %label, url = %initial_url, "Created child webview");

        Ok(Arc::new(WebviewEngine {
            webview,
            documents: self.documents.clone(),
        }))
    }
}
