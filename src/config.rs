//! Configuration for bryc
//!
//! Loaded from an optional `bryc.toml` at the root of the source tree:
//!
//! ```toml
//! [source]
//! extensions = ["py", "bry"]
//!
//! [artifact]
//! suffix = ".js"
//!
//! [transpiler]
//! command = "brython-transpile"
//! args = ["--module", "{module}"]
//! ```
//!
//! Every section is optional; a missing file yields the defaults. The
//! transpiler command has no default and must come from the config file or
//! the `--transpiler` flag.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BrycError, BrycResult};

/// Config file name, looked up inside the source root
pub const CONFIG_FILE: &str = "bryc.toml";

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub artifact: ArtifactConfig,

    #[serde(default)]
    pub transpiler: TranspilerConfig,
}

/// Which files count as sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Recognized source extensions, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            extensions: default_extensions(),
        }
    }
}

fn default_extensions() -> Vec<String> {
    vec!["py".to_string(), "bry".to_string()]
}

/// How artifact paths are derived
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Suffix appended to the full source file name (`a.py` -> `a.py.js`)
    #[serde(default = "default_suffix")]
    pub suffix: String,
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
        }
    }
}

fn default_suffix() -> String {
    ".js".to_string()
}

/// External transpiler invocation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TranspilerConfig {
    /// Program to run; source text arrives on its stdin, target text is
    /// read from its stdout
    #[serde(default)]
    pub command: Option<String>,

    /// Arguments; `{module}` is replaced with the logical module name
    #[serde(default)]
    pub args: Vec<String>,
}

impl Config {
    /// Parse a config file
    pub fn load(path: &Path) -> BrycResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| BrycError::InvalidConfig {
            file: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load `bryc.toml` from the source root, falling back to defaults when
    /// the file does not exist
    pub fn load_for_source(source_root: &Path) -> BrycResult<Self> {
        let path = source_root.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
