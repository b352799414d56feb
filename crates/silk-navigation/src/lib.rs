//! Silk Navigation
//!
//! - History: de-duplicated, insertion-ordered list of visited URLs
//! - Address bar input: scheme-prefix normalisation before a load

mod history;
mod input;

pub use history::{HistoryEntry, HistoryTracker};
pub use input::{has_recognized_scheme, resolve_input, DEFAULT_SCHEME, RECOGNIZED_SCHEMES};
