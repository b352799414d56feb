//! Tab Manager
//!
//! Ordered tab list plus the index of the active tab. Whenever the list is
//! non-empty the active index points into it.
//!
//! No lock is held while an engine is created, closed or driven: engines may
//! report events straight back into the session from inside those calls.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Weak};
use uuid::Uuid;

use crate::engine::{Engine, EngineEvents, EngineFactory, EngineObserver};
use crate::error::TabError;
use crate::tab::Tab;
use crate::Result;

/// Position and identity of a tab at the time of the call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabHandle {
    pub id: String,
    pub index: usize,
}

/// Tab strip entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabSummary {
    pub id: String,
    pub title: String,
    pub index: usize,
    pub is_active: bool,
}

/// Where a new tab starts and what it is called until the page names it
#[derive(Debug, Clone)]
pub struct TabDefaults {
    pub start_url: String,
    pub title: String,
}

impl Default for TabDefaults {
    fn default() -> Self {
        Self {
            start_url: "about:blank".to_string(),
            title: "New Tab".to_string(),
        }
    }
}

#[derive(Default)]
struct TabList {
    tabs: Vec<Tab>,
    active: Option<usize>,
}

impl TabList {
    fn handle(&self, index: usize) -> Option<TabHandle> {
        self.tabs.get(index).map(|tab| TabHandle {
            id: tab.id.clone(),
            index,
        })
    }

    fn position(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == tab_id)
    }
}

pub struct TabManager {
    list: Arc<RwLock<TabList>>,
    factory: Arc<dyn EngineFactory>,
    observer: Weak<dyn EngineObserver>,
    defaults: TabDefaults,
}

impl TabManager {
    pub fn new(
        factory: Arc<dyn EngineFactory>,
        observer: Weak<dyn EngineObserver>,
        defaults: TabDefaults,
    ) -> Self {
        Self {
            list: Arc::new(RwLock::new(TabList::default())),
            factory,
            observer,
            defaults,
        }
    }

    /// Open a blank tab at the end of the strip and make it active
    pub fn open_tab(&self) -> Result<TabHandle> {
        let id = Uuid::new_v4().to_string();
        let events = EngineEvents::new(id.clone(), self.observer.clone());
        let engine = self
            .factory
            .create(&self.defaults.start_url, events.clone())?;

        let tab = Tab::new(self.defaults.title.clone(), engine, events);

        let mut list = self.list.write();
        list.tabs.push(tab);
        let index = list.tabs.len() - 1;
        list.active = Some(index);

        tracing::info!(tab_id = %id, index, "Opened tab");

        Ok(TabHandle { id, index })
    }

    pub fn active_tab(&self) -> Option<TabHandle> {
        let list = self.list.read();
        list.active.and_then(|index| list.handle(index))
    }

    pub fn active_engine(&self) -> Option<Arc<dyn Engine>> {
        let list = self.list.read();
        list.active
            .and_then(|index| list.tabs.get(index))
            .map(Tab::engine)
    }

    pub fn is_active(&self, tab_id: &str) -> bool {
        let list = self.list.read();
        list.active
            .and_then(|index| list.tabs.get(index))
            .is_some_and(|tab| tab.id == tab_id)
    }

    /// Select the tab at `index`
    pub fn set_active(&self, index: usize) -> Result<TabHandle> {
        let mut list = self.list.write();
        let handle = list.handle(index).ok_or(TabError::IndexOutOfRange {
            index,
            count: list.tabs.len(),
        })?;
        list.active = Some(index);

        tracing::debug!(tab_id = %handle.id, index, "Activated tab");

        Ok(handle)
    }

    /// Close the tab at `index` and return the tab that is active afterwards.
    ///
    /// The tab at the same position takes over, else the one before it.
    pub fn close_tab(&self, index: usize) -> Result<Option<TabHandle>> {
        let (closed, next) = {
            let mut list = self.list.write();
            if index >= list.tabs.len() {
                return Err(TabError::IndexOutOfRange {
                    index,
                    count: list.tabs.len(),
                });
            }

            let closed = list.tabs.remove(index);
            list.active = match list.active {
                _ if list.tabs.is_empty() => None,
                Some(active) if active > index => Some(active - 1),
                Some(active) if active == index => Some(index.min(list.tabs.len() - 1)),
                other => other,
            };

            (closed, list.active.and_then(|i| list.handle(i)))
        };

        tracing::info!(tab_id = %closed.id, index, "Closing tab");
        closed.close();

        Ok(next)
    }

    pub fn find(&self, tab_id: &str) -> Option<TabHandle> {
        let list = self.list.read();
        list.position(tab_id).and_then(|index| list.handle(index))
    }

    pub fn engine(&self, tab_id: &str) -> Option<Arc<dyn Engine>> {
        let list = self.list.read();
        list.position(tab_id).map(|index| list.tabs[index].engine())
    }

    pub fn set_title(&self, tab_id: &str, title: String) -> Result<()> {
        let mut list = self.list.write();
        let index = list
            .position(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        list.tabs[index].set_title(title);
        Ok(())
    }

    pub fn tabs(&self) -> Vec<TabSummary> {
        let list = self.list.read();
        list.tabs
            .iter()
            .enumerate()
            .map(|(index, tab)| TabSummary {
                id: tab.id.clone(),
                title: tab.title.clone(),
                index,
                is_active: list.active == Some(index),
            })
            .collect()
    }

    pub fn tab_count(&self) -> usize {
        self.list.read().tabs.len()
    }

    /// Close every tab, last first
    pub fn close_all(&self) {
        let tabs = {
            let mut list = self.list.write();
            list.active = None;
            std::mem::take(&mut list.tabs)
        };

        for tab in tabs.into_iter().rev() {
            tab.close();
        }
    }
}

impl Clone for TabManager {
    fn clone(&self) -> Self {
        Self {
            list: Arc::clone(&self.list),
            factory: Arc::clone(&self.factory),
            observer: self.observer.clone(),
            defaults: self.defaults.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::testing::{Call, FakeFactory, RecordingObserver};

    fn manager() -> (TabManager, Arc<FakeFactory>, Arc<RecordingObserver>) {
        let factory = Arc::new(FakeFactory::default());
        let observer = Arc::new(RecordingObserver::default());
        let weak = Arc::downgrade(&observer) as Weak<dyn EngineObserver>;
        let manager = TabManager::new(factory.clone(), weak, TabDefaults::default());
        (manager, factory, observer)
    }

    #[test]
    fn test_open_tab_becomes_active() {
        let (manager, factory, _) = manager();
        assert!(manager.active_tab().is_none());

        let first = manager.open_tab().unwrap();
        let second = manager.open_tab().unwrap();

        assert_eq!(manager.active_tab(), Some(second.clone()));
        assert_eq!(second.index, 1);
        assert!(manager.is_active(&second.id));
        assert!(!manager.is_active(&first.id));

        let active: Vec<_> = manager.tabs().into_iter().filter(|t| t.is_active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id, second.id);

        assert_eq!(factory.engine(0).current_url(), "about:blank");
        assert_eq!(manager.tabs()[0].title, "New Tab");
    }

    #[test]
    fn test_set_active() {
        let (manager, _, _) = manager();
        let first = manager.open_tab().unwrap();
        manager.open_tab().unwrap();

        let handle = manager.set_active(0).unwrap();

        assert_eq!(handle, first);
        assert_eq!(manager.active_tab(), Some(first));
    }

    #[test]
    fn test_set_active_out_of_range() {
        let (manager, _, _) = manager();
        let only = manager.open_tab().unwrap();

        let result = manager.set_active(3);

        assert!(matches!(
            result,
            Err(TabError::IndexOutOfRange { index: 3, count: 1 })
        ));
        assert_eq!(manager.active_tab(), Some(only));
    }

    #[test]
    fn test_empty_session_has_no_engine() {
        let (manager, _, _) = manager();
        assert!(manager.active_engine().is_none());
        assert!(manager.set_active(0).is_err());
        assert_eq!(manager.tab_count(), 0);
    }

    #[test]
    fn test_close_active_selects_neighbour() {
        let (manager, factory, _) = manager();
        let a = manager.open_tab().unwrap();
        let b = manager.open_tab().unwrap();
        let c = manager.open_tab().unwrap();
        manager.set_active(1).unwrap();

        // Closing the middle tab hands focus to the one that slides into its place
        let next = manager.close_tab(1).unwrap();
        assert_eq!(next.as_ref().map(|h| h.id.as_str()), Some(c.id.as_str()));
        assert!(manager.find(&b.id).is_none());
        assert_eq!(*factory.engine(1).calls.lock(), vec![Call::Close]);

        // Closing the last position falls back to the previous tab
        let next = manager.close_tab(1).unwrap();
        assert_eq!(next, Some(TabHandle { id: a.id.clone(), index: 0 }));

        let next = manager.close_tab(0).unwrap();
        assert!(next.is_none());
        assert!(manager.active_tab().is_none());
    }

    #[test]
    fn test_close_before_active_keeps_selection() {
        let (manager, _, _) = manager();
        manager.open_tab().unwrap();
        let b = manager.open_tab().unwrap();

        let next = manager.close_tab(0).unwrap();

        assert_eq!(next, Some(TabHandle { id: b.id, index: 0 }));
    }

    #[test]
    fn test_closed_tab_is_unsubscribed() {
        let (manager, factory, observer) = manager();
        let tab = manager.open_tab().unwrap();
        let engine = factory.engine(0);

        engine.events.url_changed("http://a.com");
        manager.close_tab(0).unwrap();
        engine.events.url_changed("http://late.com");

        assert_eq!(
            *observer.urls.lock(),
            vec![(tab.id, "http://a.com".to_string())]
        );
    }

    #[test]
    fn test_set_title() {
        let (manager, _, _) = manager();
        let tab = manager.open_tab().unwrap();

        manager.set_title(&tab.id, "Example Domain".to_string()).unwrap();

        assert_eq!(manager.tabs()[0].title, "Example Domain");
        assert!(matches!(
            manager.set_title("missing", String::new()),
            Err(TabError::NotFound(_))
        ));
    }

    #[test]
    fn test_close_all() {
        let (manager, factory, _) = manager();
        manager.open_tab().unwrap();
        manager.open_tab().unwrap();

        manager.close_all();

        assert_eq!(manager.tab_count(), 0);
        assert!(manager.active_tab().is_none());
        assert_eq!(*factory.engine(0).calls.lock(), vec![Call::Close]);
        assert_eq!(*factory.engine(1).calls.lock(), vec![Call::Close]);
    }
}
