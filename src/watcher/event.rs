//! Change classification and watch event reporting

use std::path::PathBuf;

use notify::event::{ModifyKind, RenameMode};
use notify::{Event, EventKind};

use crate::mapper::PathMapper;

/// A classified change to the source tree.
///
/// Watch backends conflate renames into generic modify notifications that
/// carry the old and the new path; the translation into this explicit type
/// happens once, in [`classify`], so the reaction logic never re-derives
/// the move heuristic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceChange {
    /// A source file's content changed
    Edit(PathBuf),
    /// A source file moved from one location to another
    Moved { from: PathBuf, to: PathBuf },
    /// A source file was deleted
    Delete(PathBuf),
}

/// Translate one raw notification into source changes.
///
/// Paths failing the source-file predicate are dropped first; when no path
/// survives, the whole notification is skipped. A modify notification
/// carrying exactly two paths is a move from the first to the second, kept
/// even when the filter discarded one of the pair - the surviving half
/// still needs its reaction.
///
/// Backends that report a rename as two unpaired halves degrade to a
/// delete of the vacated path plus an edit of the new one, which reaches
/// the same end state (the remover tolerates the later duplicate delete of
/// a paired event). Create and access notifications are ignored; content
/// reaching a file always surfaces as a modify.
pub fn classify(event: &Event, mapper: &PathMapper) -> Vec<SourceChange> {
    let surviving: Vec<&PathBuf> = event
        .paths
        .iter()
        .filter(|p| mapper.is_source_file(p))
        .collect();
    if surviving.is_empty() {
        return Vec::new();
    }

    match event.kind {
        EventKind::Modify(_) if event.paths.len() == 2 => vec![SourceChange::Moved {
            from: event.paths[0].clone(),
            to: event.paths[1].clone(),
        }],
        EventKind::Modify(ModifyKind::Name(RenameMode::From)) => surviving
            .into_iter()
            .map(|p| SourceChange::Delete(p.clone()))
            .collect(),
        EventKind::Modify(ModifyKind::Name(RenameMode::To)) => surviving
            .into_iter()
            .map(|p| SourceChange::Edit(p.clone()))
            .collect(),
        EventKind::Modify(ModifyKind::Name(_)) => surviving
            .into_iter()
            .map(|p| {
                if p.exists() {
                    SourceChange::Edit(p.clone())
                } else {
                    SourceChange::Delete(p.clone())
                }
            })
            .collect(),
        EventKind::Modify(_) => surviving
            .into_iter()
            .map(|p| SourceChange::Edit(p.clone()))
            .collect(),
        EventKind::Remove(_) => surviving
            .into_iter()
            .map(|p| SourceChange::Delete(p.clone()))
            .collect(),
        _ => Vec::new(),
    }
}

/// Watch event types for NDJSON output
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WatchEvent {
    WatchStarted {
        source: String,
    },
    SyncStarted,
    SyncComplete {
        written: usize,
        errors: usize,
    },
    Converted {
        source: String,
        artifact: String,
    },
    Removed {
        artifact: String,
    },
    Error {
        message: String,
    },
    Shutdown,
}

impl WatchEvent {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }
}
