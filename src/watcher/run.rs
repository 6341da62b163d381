//! Watch loop: consume change notifications and keep artifacts current

use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, RecvTimeoutError};
use std::sync::Arc;
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::error::{BrycError, BrycResult};
use crate::sync::SyncEngine;
use crate::transpiler::Transpiler;

use super::event::{classify, SourceChange, WatchEvent};

/// Poll interval for the shutdown flag while waiting for notifications
const POLL_MS: u64 = 50;

/// Run the initial sync, then watch the source tree until `running` clears.
///
/// Reactions run strictly one at a time in arrival order; a slow transpile
/// delays every later reaction. Per-file failures are reported through the
/// callback and the loop keeps going. Losing the notification stream is
/// fatal: artifacts cannot be kept current without it.
pub fn watch<T: Transpiler>(
    engine: &SyncEngine<T>,
    running: Arc<AtomicBool>,
    event_callback: impl Fn(WatchEvent),
) -> BrycResult<()> {
    let source_root = engine.mapper().source_root().to_path_buf();
    event_callback(WatchEvent::WatchStarted {
        source: source_root.display().to_string(),
    });

    // Establish the baseline before consuming any deltas.
    event_callback(WatchEvent::SyncStarted);
    let result = engine.sync_all()?;
    for error in &result.errors {
        event_callback(WatchEvent::Error {
            message: error.clone(),
        });
    }
    event_callback(WatchEvent::SyncComplete {
        written: result.written.len(),
        errors: result.errors.len(),
    });

    let (tx, rx) = channel();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<Event, notify::Error>| {
            if let Ok(event) = res {
                let _ = tx.send(event);
            }
        },
        Config::default(),
    )?;
    watcher.watch(&source_root, RecursiveMode::Recursive)?;

    while running.load(Ordering::SeqCst) {
        match rx.recv_timeout(Duration::from_millis(POLL_MS)) {
            Ok(event) => {
                for change in classify(&event, engine.mapper()) {
                    handle_change(engine, &change, &event_callback);
                }
            }
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Err(BrycError::WatchStreamClosed),
        }
    }

    event_callback(WatchEvent::Shutdown);
    Ok(())
}

/// React to one classified change.
///
/// For a move, removing the old artifact and converting the new location
/// are independent: one branch failing does not suppress the other, and a
/// destination outside the source root only triggers the removal.
pub(crate) fn handle_change<T: Transpiler>(
    engine: &SyncEngine<T>,
    change: &SourceChange,
    emit: &impl Fn(WatchEvent),
) {
    match change {
        SourceChange::Edit(path) => convert_one(engine, path, emit),
        SourceChange::Delete(path) => remove_one(engine, path, emit),
        SourceChange::Moved { from, to } => {
            let mapper = engine.mapper();
            if mapper.is_source_file(from) {
                remove_one(engine, from, emit);
            }
            if to.starts_with(mapper.source_root()) && mapper.is_source_file(to) {
                convert_one(engine, to, emit);
            }
        }
    }
}

fn convert_one<T: Transpiler>(engine: &SyncEngine<T>, source: &Path, emit: &impl Fn(WatchEvent)) {
    match engine.convert(source) {
        Ok(artifact) => emit(WatchEvent::Converted {
            source: source.display().to_string(),
            artifact: artifact.display().to_string(),
        }),
        Err(e) => emit(WatchEvent::Error {
            message: format!("{}: {}", source.display(), e),
        }),
    }
}

fn remove_one<T: Transpiler>(engine: &SyncEngine<T>, source: &Path, emit: &impl Fn(WatchEvent)) {
    let removed = engine.mapper().artifact_path(source).and_then(|artifact| {
        engine.remove_artifact(&artifact)?;
        Ok(artifact)
    });
    match removed {
        Ok(artifact) => emit(WatchEvent::Removed {
            artifact: artifact.display().to_string(),
        }),
        Err(e) => emit(WatchEvent::Error {
            message: format!("{}: {}", source.display(), e),
        }),
    }
}
