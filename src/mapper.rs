//! Source-to-artifact path mapping
//!
//! The mapping is a pure prefix/suffix transform: the source root prefix is
//! swapped for the artifact root and the artifact suffix is appended to the
//! file name (`src/pkg/app.py` -> `out/pkg/app.py.js`). Nothing is cached;
//! every operation re-derives the artifact path from the source path, which
//! keeps the engine stateless and restart-safe.

use std::path::{Path, PathBuf};

use crate::error::{BrycError, BrycResult};

/// Maps source paths to artifact paths and decides which files are sources.
#[derive(Debug, Clone)]
pub struct PathMapper {
    source_root: PathBuf,
    artifact_root: PathBuf,
    extensions: Vec<String>,
    suffix: String,
}

impl PathMapper {
    pub fn new(
        source_root: PathBuf,
        artifact_root: PathBuf,
        extensions: Vec<String>,
        suffix: String,
    ) -> Self {
        Self {
            source_root,
            artifact_root,
            extensions,
            suffix,
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn artifact_root(&self) -> &Path {
        &self.artifact_root
    }

    /// True iff the file's extension is one of the recognized source
    /// extensions. Pure, no filesystem access.
    pub fn is_source_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|known| known == ext))
            .unwrap_or(false)
    }

    /// Derive the artifact path for a source path.
    ///
    /// The source path must lie under the source root; anything else is an
    /// `OutsideSourceRoot` error rather than a silently wrong path.
    pub fn artifact_path(&self, source: &Path) -> BrycResult<PathBuf> {
        let relative =
            source
                .strip_prefix(&self.source_root)
                .map_err(|_| BrycError::OutsideSourceRoot {
                    path: source.to_path_buf(),
                    root: self.source_root.clone(),
                })?;

        let mut artifact = self.artifact_root.join(relative);
        let mut name = artifact
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(&self.suffix);
        artifact.set_file_name(name);
        Ok(artifact)
    }

    /// Logical module identifier handed to the transpiler: the file's base
    /// name without its extension.
    pub fn module_name(&self, source: &Path) -> String {
        source
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string()
    }
}
