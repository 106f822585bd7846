//! Configuration file support.
//!
//! A workspace may carry a `.depgraph.toml` next to its `go.work`. Every key is
//! optional:
//!
//! ```toml
//! extension = "go"
//! include-tests = false
//! follow-symlinks = false
//! ignored-dirs = ["testdata", "vendor"]
//! relative-fallback = "members"
//! ```

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::fs::read_to_string;

/// File name looked up in the workspace root by [`Config::discover`].
pub const CONFIG_FILE: &str = ".depgraph.toml";

/// What the module graph does with a relative dependency that did not resolve
/// through the name registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelativeFallback {
    /// Keep the edge only if the path is a workspace member.
    #[default]
    Members,
    /// Insert the normalized path verbatim, member or not.
    Literal,
}

impl RelativeFallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeFallback::Members => "members",
            RelativeFallback::Literal => "literal",
        }
    }
}

/// Dependency graph configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Source file extension, without the dot.
    pub extension: String,

    /// Scan `_test.go` files too.
    pub include_tests: bool,

    /// Descend into symlinked directories and read symlinked source files.
    /// When off, symlinked source files are skipped with a warning.
    pub follow_symlinks: bool,

    /// Directory names never descended into.
    pub ignored_dirs: Vec<String>,

    pub relative_fallback: RelativeFallback,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            extension: "go".to_string(),
            include_tests: false,
            follow_symlinks: false,
            ignored_dirs: vec!["testdata".to_string(), "vendor".to_string()],
            relative_fallback: RelativeFallback::Members,
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = read_to_string(path)?;

        let mut config: Config = toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        config.extension = config.extension.trim_start_matches('.').to_string();
        Ok(config)
    }

    /// Load `<root>/.depgraph.toml` if it exists, defaults otherwise.
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if path.is_file() {
            tracing::debug!("using config {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Whether `path` names a source file: exact extension match, and test
    /// files only when enabled.
    pub fn is_source_file(&self, path: &Path) -> bool {
        let matches_ext = path
            .extension()
            .map_or(false, |ext| ext == self.extension.as_str());
        if !matches_ext {
            return false;
        }
        if self.include_tests {
            return true;
        }
        !path
            .file_stem()
            .map_or(false, |stem| stem.to_string_lossy().ends_with("_test"))
    }

    /// Whether a directory with this name is skipped during the source walk.
    ///
    /// Hidden (`.`) and underscore-prefixed directories are always skipped.
    pub fn is_ignored_dir(&self, name: &str) -> bool {
        name.starts_with('.')
            || name.starts_with('_')
            || self.ignored_dirs.iter().any(|dir| dir == name)
    }
}
