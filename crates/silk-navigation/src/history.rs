//! History management
//!
//! Visited URLs in first-visit order. Entries are never removed and the list
//! is not bounded; it lives for the duration of the session only.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub url: String,
    pub first_visited_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct HistoryTracker {
    entries: Arc<RwLock<Vec<HistoryEntry>>>,
}

impl HistoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a visit to a URL.
    ///
    /// Returns `true` if the URL was not in the list before. Matching is exact
    /// string equality.
    pub fn record(&self, url: &str) -> bool {
        let mut entries = self.entries.write();
        if entries.iter().any(|entry| entry.url == url) {
            return false;
        }

        entries.push(HistoryEntry {
            url: url.to_string(),
            first_visited_at: Utc::now(),
        });

        tracing::debug!(url = %url, total = entries.len(), "Recorded history entry");

        true
    }

    /// Visited URLs in first-visit order
    pub fn list(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|entry| entry.url.clone())
            .collect()
    }

    pub fn entries(&self) -> Vec<HistoryEntry> {
        self.entries.read().clone()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.entries.read().iter().any(|entry| entry.url == url)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Clone for HistoryTracker {
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}
