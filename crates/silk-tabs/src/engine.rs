//! Engine instance contract
//!
//! The web engine is external. The shell drives it through [`Engine`] and
//! hears back from it through the [`EngineEvents`] handed over at creation.
//! Events may arrive at any later point and for a tab that is no longer the
//! active one, so every event carries the id of the tab it was created for.

use silk_download::{DownloadItem, DownloadMediator};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use crate::Result;

/// Receives the serialised document, or why the engine could not produce it
pub type DocumentCallback = Box<dyn FnOnce(Result<String>) + Send>;

/// One navigable web view
pub trait Engine: Send + Sync {
    fn load(&self, url: &str);

    fn back(&self);

    fn forward(&self);

    fn reload(&self);

    fn current_url(&self) -> String;

    /// Only the active tab's view is on screen
    fn set_visible(&self, visible: bool);

    /// Serialise the current document to markup.
    ///
    /// `on_complete` is called exactly once, either before this returns or
    /// later from the engine's own callbacks. Callers must not hold locks the
    /// callback needs. An engine that drops a request without answering it
    /// (because its view was closed) never calls `on_complete`.
    fn serialize_document(&self, on_complete: DocumentCallback);

    /// Dispose of the underlying view
    fn close(&self);
}

pub trait EngineFactory: Send + Sync {
    /// Create an engine showing `initial_url`, reporting through `events`.
    fn create(&self, initial_url: &str, events: EngineEvents) -> Result<Arc<dyn Engine>>;
}

/// Session-side receiver of engine events
pub trait EngineObserver: Send + Sync {
    fn url_changed(&self, tab_id: &str, url: &str);

    fn title_changed(&self, tab_id: &str, title: &str);

    fn download_requested(&self, tab_id: &str, item: Box<dyn DownloadItem>);
}

/// An engine's subscription to the session, bound to one tab.
///
/// Holds the session weakly; the session owns the tab, which owns the engine,
/// which owns this.
#[derive(Clone)]
pub struct EngineEvents {
    tab_id: String,
    observer: Weak<dyn EngineObserver>,
    subscribed: Arc<AtomicBool>,
}

impl EngineEvents {
    pub fn new(tab_id: String, observer: Weak<dyn EngineObserver>) -> Self {
        Self {
            tab_id,
            observer,
            subscribed: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscribed.load(Ordering::Acquire) && self.observer.strong_count() > 0
    }

    /// Stop delivering events. Shared by every clone of this subscription.
    pub fn unsubscribe(&self) {
        self.subscribed.store(false, Ordering::Release);
    }

    fn observer(&self) -> Option<Arc<dyn EngineObserver>> {
        if !self.subscribed.load(Ordering::Acquire) {
            return None;
        }
        self.observer.upgrade()
    }

    pub fn url_changed(&self, url: &str) {
        match self.observer() {
            Some(observer) => observer.url_changed(&self.tab_id, url),
            None => tracing::debug!(
                tab_id = %self.tab_id,
                url = %url,
                "Dropped URL change for closed tab"
            ),
        }
    }

    pub fn title_changed(&self, title: &str) {
        if let Some(observer) = self.observer() {
            observer.title_changed(&self.tab_id, title);
        }
    }

    /// Hand a download to the session. Without a live subscription the
    /// download is cancelled on the spot.
    pub fn download_requested(&self, item: Box<dyn DownloadItem>) {
        match self.observer() {
            Some(observer) => observer.download_requested(&self.tab_id, item),
            None => {
                tracing::debug!(tab_id = %self.tab_id, "Download offered to closed tab");
                DownloadMediator::reject_orphan(item);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingObserver;
    use super::*;
    use parking_lot::Mutex;
    use std::path::PathBuf;

    struct CountingItem(Arc<Mutex<Vec<&'static str>>>);

    impl DownloadItem for CountingItem {
        fn url(&self) -> &str {
            "https://example.com/file.bin"
        }

        fn suggested_file_name(&self) -> Option<String> {
            None
        }

        fn accept(self: Box<Self>, _destination: PathBuf) {
            self.0.lock().push("accept");
        }

        fn cancel(self: Box<Self>) {
            self.0.lock().push("cancel");
        }
    }

    #[test]
    fn test_events_carry_tab_id() {
        let observer = Arc::new(RecordingObserver::default());
        let weak = Arc::downgrade(&observer) as Weak<dyn EngineObserver>;
        let events = EngineEvents::new("tab-1".to_string(), weak);

        events.url_changed("http://a.com");
        events.title_changed("A");

        assert_eq!(
            *observer.urls.lock(),
            vec![("tab-1".to_string(), "http://a.com".to_string())]
        );
        assert_eq!(
            *observer.titles.lock(),
            vec![("tab-1".to_string(), "A".to_string())]
        );
    }

    #[test]
    fn test_unsubscribe_drops_events_and_cancels_downloads() {
        let observer = Arc::new(RecordingObserver::default());
        let weak = Arc::downgrade(&observer) as Weak<dyn EngineObserver>;
        let events = EngineEvents::new("tab-1".to_string(), weak);
        let engine_side = events.clone();

        events.unsubscribe();
        assert!(!engine_side.is_subscribed());

        engine_side.url_changed("http://late.com");
        let log = Arc::new(Mutex::new(Vec::new()));
        engine_side.download_requested(Box::new(CountingItem(Arc::clone(&log))));

        assert!(observer.urls.lock().is_empty());
        assert!(observer.downloads.lock().is_empty());
        assert_eq!(*log.lock(), vec!["cancel"]);
    }

    #[test]
    fn test_dropped_session_unsubscribes() {
        let observer = Arc::new(RecordingObserver::default());
        let weak = Arc::downgrade(&observer) as Weak<dyn EngineObserver>;
        let events = EngineEvents::new("tab-1".to_string(), weak);
        assert!(events.is_subscribed());

        drop(observer);

        assert!(!events.is_subscribed());
        events.url_changed("http://a.com");
    }
}
