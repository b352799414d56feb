//! Silk Tab Management
//!
//! A tab pairs a display title with exactly one engine instance. The tab list
//! is ordered and at most one tab is active at a time.

mod engine;
mod error;
mod manager;
mod tab;

pub use engine::{DocumentCallback, Engine, EngineEvents, EngineFactory, EngineObserver};
pub use error::TabError;
pub use manager::{TabDefaults, TabHandle, TabManager, TabSummary};
pub use tab::Tab;

pub type Result<T> = std::result::Result<T, TabError>;
