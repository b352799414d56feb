//! Tab data structure

use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use crate::engine::{Engine, EngineEvents};

pub struct Tab {
    /// Unique identifier
    pub id: String,
    /// Title shown in the tab strip
    pub title: String,
    pub created_at: DateTime<Utc>,
    engine: Arc<dyn Engine>,
    events: EngineEvents,
}

impl Tab {
    pub(crate) fn new(title: String, engine: Arc<dyn Engine>, events: EngineEvents) -> Self {
        Self {
            id: events.tab_id().to_string(),
            title,
            created_at: Utc::now(),
            engine,
            events,
        }
    }

    pub fn engine(&self) -> Arc<dyn Engine> {
        Arc::clone(&self.engine)
    }

    pub fn set_title(&mut self, title: String) {
        self.title = title;
    }

    /// Unsubscribe first so no event reaches a tab that is being torn down,
    /// then dispose of the engine.
    pub(crate) fn close(self) {
        self.events.unsubscribe();
        self.engine.close();

        tracing::debug!(tab_id = %self.id, "Tab closed");
    }
}

impl fmt::Debug for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tab")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}
