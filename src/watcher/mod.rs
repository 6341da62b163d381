//! File watcher for continuous sync
//!
//! Implements the `watch` command with:
//! - Classification of raw notifications into edit / move / delete
//! - Strictly sequential reactions, one change at a time, in arrival order
//! - Graceful Ctrl+C shutdown
//! - NDJSON output for CI

mod event;
mod run;

pub use event::{classify, SourceChange, WatchEvent};
pub use run::watch;
