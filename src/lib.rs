//! Bryc - Brython AOT compiler and synchronization tool
//!
//! Bryc keeps a tree of JavaScript artifacts in sync with a tree of
//! Python/Brython sources: every source file maps to exactly one artifact,
//! produced by an external transpiler, and watch mode applies filesystem
//! changes to the artifact tree as they happen.

pub mod config;
pub mod error;
pub mod mapper;
pub mod sync;
pub mod transpiler;
pub mod watcher;

// Re-exports for convenience
pub use config::Config;
pub use error::{BrycError, BrycResult};
pub use mapper::PathMapper;
pub use sync::{SyncEngine, SyncResult};
pub use transpiler::{CommandTranspiler, Transpiler};
pub use watcher::{classify, watch, SourceChange, WatchEvent};
