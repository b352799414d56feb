//! Download request state
//!
//! ```text
//! Offered
//!   ↓ confirmation shown
//! ConfirmPrompted
//!   ↓ yes + path        ↓ no / dismissed / no path
//! Accepted             Cancelled
//! ```
//!
//! `Offered → Cancelled` is also allowed for requests that reach a tab which
//! has already been closed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use uuid::Uuid;

use crate::error::DownloadError;
use crate::Result;

/// The engine's handle on one offered download.
///
/// Both terminal instructions take the item by value, so at most one of them
/// can ever be sent.
pub trait DownloadItem: Send {
    fn url(&self) -> &str;

    /// Name proposed by the engine, if it has one
    fn suggested_file_name(&self) -> Option<String>;

    fn accept(self: Box<Self>, destination: PathBuf);

    fn cancel(self: Box<Self>);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadState {
    Offered,
    ConfirmPrompted,
    Accepted,
    Cancelled,
}

impl DownloadState {
    pub fn can_transition_to(&self, target: DownloadState) -> bool {
        matches!(
            (self, target),
            (DownloadState::Offered, DownloadState::ConfirmPrompted)
                | (DownloadState::Offered, DownloadState::Cancelled)
                | (DownloadState::ConfirmPrompted, DownloadState::Accepted)
                | (DownloadState::ConfirmPrompted, DownloadState::Cancelled)
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadState::Offered => "offered",
            DownloadState::ConfirmPrompted => "confirm_prompted",
            DownloadState::Accepted => "accepted",
            DownloadState::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for DownloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CancelReason {
    /// The user answered No or closed the confirmation
    Declined,
    /// The user closed the destination prompt
    NoDestination,
    /// The owning tab was closed before the request arrived
    TabClosed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Accepted(PathBuf),
    Cancelled(CancelReason),
}

impl DownloadOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, DownloadOutcome::Accepted(_))
    }
}

pub struct DownloadRequest {
    pub id: String,
    pub url: String,
    pub file_name: String,
    pub offered_at: DateTime<Utc>,
    state: DownloadState,
    item: Box<dyn DownloadItem>,
}

impl DownloadRequest {
    pub fn new(item: Box<dyn DownloadItem>) -> Self {
        let url = item.url().to_string();
        let file_name = item
            .suggested_file_name()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| suggested_file_name(&url));

        Self {
            id: Uuid::new_v4().to_string(),
            url,
            file_name,
            offered_at: Utc::now(),
            state: DownloadState::Offered,
            item,
        }
    }

    fn transition_to(&mut self, new_state: DownloadState) -> Result<()> {
        if !self.state.can_transition_to(new_state) {
            return Err(DownloadError::InvalidTransition {
                from: self.state.to_string(),
                to: new_state.to_string(),
            });
        }

        tracing::debug!(
            download_id = %self.id,
            from = %self.state,
            to = %new_state,
            "Download state transition"
        );

        self.state = new_state;
        Ok(())
    }

    /// Mark the confirmation prompt as shown
    pub fn prompt(&mut self) -> Result<()> {
        self.transition_to(DownloadState::ConfirmPrompted)
    }

    /// Tell the engine to save into `destination`.
    ///
    /// Only valid after the confirmation prompt. From any other state the
    /// engine is told to cancel instead and the transition error is returned.
    pub fn accept(mut self, destination: PathBuf) -> Result<DownloadOutcome> {
        if let Err(e) = self.transition_to(DownloadState::Accepted) {
            self.item.cancel();
            return Err(e);
        }

        tracing::info!(
            download_id = %self.id,
            url = %self.url,
            destination = %destination.display(),
            "Download accepted"
        );

        self.item.accept(destination.clone());
        Ok(DownloadOutcome::Accepted(destination))
    }

    pub fn cancel(mut self, reason: CancelReason) -> DownloadOutcome {
        // Valid from every non-terminal state, and a request is consumed by
        // its terminal transition.
        let _ = self.transition_to(DownloadState::Cancelled);

        tracing::info!(
            download_id = %self.id,
            url = %self.url,
            reason = ?reason,
            "Download cancelled"
        );

        self.item.cancel();
        DownloadOutcome::Cancelled(reason)
    }
}

impl fmt::Debug for DownloadRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DownloadRequest")
            .field("id", &self.id)
            .field("url", &self.url)
            .field("file_name", &self.file_name)
            .field("offered_at", &self.offered_at)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Best-effort file name for a download URL: the last non-empty path segment.
pub fn suggested_file_name(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        if let Some(name) = parsed
            .path_segments()
            .and_then(|mut s| s.next_back())
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            return name.to_string();
        }
    }
    "download".to_string()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// What the engine was told to do with a download
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum Instruction {
        Accept(PathBuf),
        Cancel,
    }

    pub struct FakeItem {
        pub url: String,
        pub suggested: Option<String>,
        pub log: Arc<Mutex<Vec<Instruction>>>,
    }

    impl FakeItem {
        pub fn boxed(
            url: &str,
            suggested: Option<&str>,
        ) -> (Box<dyn DownloadItem>, Arc<Mutex<Vec<Instruction>>>) {
            let log = Arc::new(Mutex::new(Vec::new()));
            let item = FakeItem {
                url: url.to_string(),
                suggested: suggested.map(str::to_string),
                log: Arc::clone(&log),
            };
            (Box::new(item), log)
        }
    }

    impl DownloadItem for FakeItem {
        fn url(&self) -> &str {
            &self.url
        }

        fn suggested_file_name(&self) -> Option<String> {
            self.suggested.clone()
        }

        fn accept(self: Box<Self>, destination: PathBuf) {
            self.log.lock().push(Instruction::Accept(destination));
        }

        fn cancel(self: Box<Self>) {
            self.log.lock().push(Instruction::Cancel);
        }
    }
}
