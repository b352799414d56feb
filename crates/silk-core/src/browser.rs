//! Main browser session
//!
//! Owns the tab strip, address bar, history, download mediator and page
//! exporter, and receives every engine event through [`EngineObserver`].

use parking_lot::RwLock;
use std::path::PathBuf;
use std::sync::{Arc, Weak};

use silk_download::{DownloadItem, DownloadMediator, FileFilter, Prompter, SavePrompt};
use silk_navigation::{resolve_input, HistoryTracker};
use silk_tabs::{EngineFactory, EngineObserver, TabDefaults, TabHandle, TabManager, TabSummary};

use crate::config::Config;
use crate::exporter::PageExporter;
use crate::presenter::Presenter;
use crate::Result;

const HISTORY_TITLE: &str = "Browsing History";
const SAVE_AS_TITLE: &str = "Save As";

/// Handle to the browser session. Clones share the same session.
#[derive(Clone)]
pub struct Browser {
    inner: Arc<Session>,
}

struct Session {
    tabs: TabManager,
    history: HistoryTracker,
    downloads: DownloadMediator,
    exporter: PageExporter,
    presenter: Arc<dyn Presenter>,
    address_bar: RwLock<String>,
}

impl Browser {
    /// Create an empty session. No tab is open until [`Browser::open_tab`].
    pub fn new<P>(config: &Config, factory: Arc<dyn EngineFactory>, presenter: Arc<P>) -> Self
    where
        P: Presenter + 'static,
    {
        let prompter: Arc<dyn Prompter> = presenter.clone();
        let presenter: Arc<dyn Presenter> = presenter;

        let inner = Arc::new_cyclic(|session: &Weak<Session>| {
            let observer: Weak<dyn EngineObserver> = session.clone();
            let defaults = TabDefaults {
                start_url: config.home_page.clone(),
                title: config.new_tab_title.clone(),
            };

            Session {
                tabs: TabManager::new(factory, observer, defaults),
                history: HistoryTracker::new(),
                downloads: DownloadMediator::new(prompter),
                exporter: PageExporter::new(Arc::clone(&presenter)),
                presenter,
                address_bar: RwLock::new(String::new()),
            }
        });

        tracing::info!("Browser session created");

        Self { inner }
    }

    // ==================== Tabs ====================

    /// Open a blank tab and switch to it
    pub fn open_tab(&self) -> Result<TabHandle> {
        let previous = self.inner.tabs.active_tab();
        let handle = self.inner.tabs.open_tab()?;
        self.inner.switched(previous, Some(handle.clone()));
        Ok(handle)
    }

    pub fn active_tab(&self) -> Option<TabHandle> {
        self.inner.tabs.active_tab()
    }

    pub fn set_active(&self, index: usize) -> Result<TabHandle> {
        let previous = self.inner.tabs.active_tab();
        let handle = self.inner.tabs.set_active(index)?;
        self.inner.switched(previous, Some(handle.clone()));
        Ok(handle)
    }

    /// Close the tab at `index`; returns the tab active afterwards
    pub fn close_tab(&self, index: usize) -> Result<Option<TabHandle>> {
        let previous = self.inner.tabs.active_tab();
        let next = self.inner.tabs.close_tab(index)?;
        self.inner.switched(previous, next.clone());
        Ok(next)
    }

    pub fn tabs(&self) -> Vec<TabSummary> {
        self.inner.tabs.tabs()
    }

    pub fn tab_count(&self) -> usize {
        self.inner.tabs.tab_count()
    }

    // ==================== Navigation ====================

    pub fn go_back(&self) {
        if let Some(engine) = self.inner.tabs.active_engine() {
            engine.back();
        }
    }

    pub fn go_forward(&self) {
        if let Some(engine) = self.inner.tabs.active_engine() {
            engine.forward();
        }
    }

    pub fn reload(&self) {
        if let Some(engine) = self.inner.tabs.active_engine() {
            engine.reload();
        }
    }

    /// Load address bar text in the active tab.
    ///
    /// Returns the URL handed to the engine, or `None` when the text was
    /// empty or no tab is open.
    pub fn navigate(&self, input: &str) -> Option<String> {
        let engine = self.inner.tabs.active_engine()?;
        let url = resolve_input(input)?;

        tracing::info!(url = %url, "Navigating");
        engine.load(&url);

        Some(url)
    }

    /// URL change reported by the engine of `tab_id`
    pub fn on_url_changed(&self, tab_id: &str, url: &str) {
        self.inner.url_changed(tab_id, url);
    }

    pub fn on_title_changed(&self, tab_id: &str, title: &str) {
        self.inner.title_changed(tab_id, title);
    }

    pub fn address_bar(&self) -> String {
        self.inner.address_bar.read().clone()
    }

    // ==================== History ====================

    pub fn history(&self) -> &HistoryTracker {
        &self.inner.history
    }

    pub fn history_list(&self) -> Vec<String> {
        self.inner.history.list()
    }

    pub fn show_history(&self) {
        let items = self.inner.history.list();
        self.inner.presenter.show_list(HISTORY_TITLE, &items);
    }

    // ==================== Export ====================

    /// Save the active page to `destination`.
    ///
    /// Returns `false` without touching the filesystem when no tab is open.
    /// The write itself happens once the engine hands back the document.
    pub fn save_active_page_as(&self, destination: impl Into<PathBuf>) -> bool {
        let Some(engine) = self.inner.tabs.active_engine() else {
            tracing::debug!("Save requested with no open tab");
            return false;
        };

        self.inner.exporter.export(engine.as_ref(), destination.into());
        true
    }

    /// Ask where to save the active page, then save it
    pub fn save_active_page(&self) -> bool {
        if self.inner.tabs.active_tab().is_none() {
            return false;
        }

        let prompt = SavePrompt {
            title: SAVE_AS_TITLE.to_string(),
            suggested_name: String::new(),
            filters: vec![FileFilter::html(), FileFilter::all_files()],
        };

        match self.inner.presenter.choose_save_path(&prompt) {
            Some(path) => self.save_active_page_as(path),
            None => false,
        }
    }

    /// Close every tab
    pub fn shutdown(&self) {
        self.inner.tabs.close_all();
        self.inner.address_bar.write().clear();
        tracing::info!("Browser session closed");
    }
}

impl Session {
    /// Bring the view of `next` on screen and point the address bar at it
    fn switched(&self, previous: Option<TabHandle>, next: Option<TabHandle>) {
        let previous_id = previous.as_ref().map(|h| h.id.as_str());
        let next_id = next.as_ref().map(|h| h.id.as_str());

        if previous_id != next_id {
            if let Some(engine) = previous_id.and_then(|id| self.tabs.engine(id)) {
                engine.set_visible(false);
            }
        }

        let Some(engine) = next_id.and_then(|id| self.tabs.engine(id)) else {
            self.address_bar.write().clear();
            return;
        };

        engine.set_visible(true);
        let url = engine.current_url();
        *self.address_bar.write() = url;

        if let Some(handle) = next {
            tracing::debug!(tab_id = %handle.id, index = handle.index, "Switched tab");
        }
    }
}

impl EngineObserver for Session {
    fn url_changed(&self, tab_id: &str, url: &str) {
        self.history.record(url);

        if self.tabs.is_active(tab_id) {
            *self.address_bar.write() = url.to_string();
        }

        tracing::debug!(tab_id = %tab_id, url = %url, "URL changed");
    }

    fn title_changed(&self, tab_id: &str, title: &str) {
        if let Err(e) = self.tabs.set_title(tab_id, title.to_string()) {
            tracing::debug!(tab_id = %tab_id, error = %e, "Title for unknown tab");
        }
    }

    fn download_requested(&self, tab_id: &str, item: Box<dyn DownloadItem>) {
        let outcome = self.downloads.download_requested(item);
        tracing::info!(tab_id = %tab_id, outcome = ?outcome, "Download resolved");
    }
}
