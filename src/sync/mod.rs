//! Artifact synchronization
//!
//! Owns the create/update/delete lifecycle of artifacts: converting one
//! source file, removing a stale artifact (with empty-directory pruning),
//! and the initial full-tree sync that establishes the baseline before
//! watch mode starts consuming change events.

mod engine;

pub use engine::SyncEngine;

/// Result of a full-tree sync
#[derive(Debug, Clone)]
pub struct SyncResult {
    /// Artifacts written
    pub written: Vec<String>,
    /// Per-file failures, each carrying the offending source path
    pub errors: Vec<String>,
}

impl SyncResult {
    pub fn new() -> Self {
        Self {
            written: Vec::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

impl Default for SyncResult {
    fn default() -> Self {
        Self::new()
    }
}
