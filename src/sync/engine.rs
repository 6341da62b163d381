//! Core synchronization engine

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{BrycError, BrycResult};
use crate::mapper::PathMapper;
use crate::transpiler::Transpiler;

use super::SyncResult;

/// Drives the artifact lifecycle for one source/artifact root pair.
///
/// The engine is generic over its only seam, the [`Transpiler`]; everything
/// else talks to the local filesystem directly. It holds no per-file state:
/// every operation re-derives what it needs from the path and the disk, so
/// restarting the engine is equivalent to re-running the initial sync.
pub struct SyncEngine<T: Transpiler> {
    mapper: PathMapper,
    transpiler: T,
}

impl<T: Transpiler> SyncEngine<T> {
    pub fn new(mapper: PathMapper, transpiler: T) -> Self {
        Self { mapper, transpiler }
    }

    pub fn mapper(&self) -> &PathMapper {
        &self.mapper
    }

    /// Convert one source file into its artifact and return the artifact
    /// path.
    ///
    /// Transpiles before touching the artifact tree, so a failed transpile
    /// never leaves a partial artifact behind.
    pub fn convert(&self, source: &Path) -> BrycResult<PathBuf> {
        let artifact = self.mapper.artifact_path(source)?;
        let text = fs::read_to_string(source)?;
        let module = self.mapper.module_name(source);
        let target = self.transpiler.transpile(&text, &module)?;

        if let Some(parent) = artifact.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&artifact, target)?;
        Ok(artifact)
    }

    /// Remove an artifact and prune now-empty parent directories.
    ///
    /// A missing artifact is a tolerated no-op: the same logical delete can
    /// arrive twice, once for a remove notification and again while
    /// handling a move. The upward walk stops at the artifact root and at
    /// the first non-empty directory.
    pub fn remove_artifact(&self, artifact: &Path) -> BrycResult<()> {
        match fs::remove_file(artifact) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
            Err(e) => return Err(e.into()),
        }

        let root = self.mapper.artifact_root();
        let mut dir = artifact.parent();
        while let Some(current) = dir {
            if current == root || !current.starts_with(root) {
                break;
            }
            match dir_is_empty(current) {
                Ok(true) => {}
                // Non-empty, or vanished in a race: either way the walk ends.
                _ => break,
            }
            if fs::remove_dir(current).is_err() {
                break;
            }
            dir = current.parent();
        }
        Ok(())
    }

    /// Walk the whole source tree once and convert every source file.
    ///
    /// Per-file failures are collected in the result rather than aborting
    /// the walk: one bad source file must not block conversion of the
    /// others. A missing source root is fatal.
    pub fn sync_all(&self) -> BrycResult<SyncResult> {
        let root = self.mapper.source_root().to_path_buf();
        if !root.is_dir() {
            return Err(BrycError::DirectoryNotFound { path: root });
        }

        let mut result = SyncResult::new();
        self.sync_dir(&root, &mut result);
        Ok(result)
    }

    fn sync_dir(&self, dir: &Path, result: &mut SyncResult) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                result.errors.push(format!("{}: {}", dir.display(), e));
                return;
            }
        };

        for entry in entries {
            let path = match entry {
                Ok(entry) => entry.path(),
                Err(e) => {
                    result.errors.push(format!("{}: {}", dir.display(), e));
                    continue;
                }
            };

            if path.is_dir() {
                self.sync_dir(&path, result);
            } else if self.mapper.is_source_file(&path) {
                match self.convert(&path) {
                    Ok(artifact) => result.written.push(artifact.display().to_string()),
                    Err(e) => result.errors.push(format!("{}: {}", path.display(), e)),
                }
            }
        }
    }
}

fn dir_is_empty(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}
