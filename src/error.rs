//! Error types for bryc
//!
//! Uses `thiserror` for library errors; the binary layer wraps these in
//! `anyhow` at the command boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bryc operations
pub type BrycResult<T> = Result<T, BrycError>;

/// Main error type for bryc operations
#[derive(Error, Debug)]
pub enum BrycError {
    /// Source root missing or not a directory
    #[error("directory not found: {path}")]
    DirectoryNotFound { path: PathBuf },

    /// A path handed to the mapper does not lie under the source root
    #[error("path '{path}' is outside the source root '{root}'")]
    OutsideSourceRoot { path: PathBuf, root: PathBuf },

    /// Artifact root nested inside (or equal to) the source root
    #[error("artifact root '{artifact_root}' must be outside the source root '{source_root}'")]
    ArtifactRootInsideSource {
        artifact_root: PathBuf,
        source_root: PathBuf,
    },

    /// No transpiler command available from config or CLI
    #[error("no transpiler command configured - set [transpiler] command in bryc.toml or pass --transpiler")]
    NoTranspiler,

    /// The external transpiler rejected a module
    #[error("transpiler failed for module '{module}': {message}")]
    TranspileFailed { module: String, message: String },

    /// Malformed bryc.toml
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Watcher setup or backend error
    #[error("watch error: {0}")]
    Watch(#[from] notify::Error),

    /// The change notification stream ended while watch mode was running
    #[error("watch event stream closed")]
    WatchStreamClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_display_outside_source_root() {
        let err = BrycError::OutsideSourceRoot {
            path: PathBuf::from("/elsewhere/app.py"),
            root: PathBuf::from("/project/src"),
        };
        assert_eq!(
            err.to_string(),
            "path '/elsewhere/app.py' is outside the source root '/project/src'"
        );
    }

    #[test]
    fn test_error_display_transpile_failed() {
        let err = BrycError::TranspileFailed {
            module: "app".to_string(),
            message: "SyntaxError: line 3".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "transpiler failed for module 'app': SyntaxError: line 3"
        );
    }

    #[test]
    fn test_error_display_directory_not_found() {
        let err = BrycError::DirectoryNotFound {
            path: PathBuf::from("missing/src"),
        };
        assert_eq!(err.to_string(), "directory not found: missing/src");
    }
}
