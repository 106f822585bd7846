//! Package - one directory of source files inside a module.

use std::path::{Path, PathBuf};

/// A source package discovered inside a workspace member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Workspace-relative directory (`./lib/util`)
    local_path: String,

    /// Import path (`example.com/lib/util`)
    canonical_name: String,

    /// Local path of the owning module
    module: String,

    /// Source files, sorted
    files: Vec<PathBuf>,

    /// Import literals with quotes trimmed, in file then declaration order
    imports: Vec<String>,
}

impl Package {
    pub fn new(
        local_path: impl Into<String>,
        canonical_name: impl Into<String>,
        module: impl Into<String>,
    ) -> Self {
        Package {
            local_path: local_path.into(),
            canonical_name: canonical_name.into(),
            module: module.into(),
            files: Vec::new(),
            imports: Vec::new(),
        }
    }

    /// Record a source file belonging to this package.
    pub fn add_file(&mut self, path: impl Into<PathBuf>) {
        self.files.push(path.into());
    }

    /// Append an import literal, trimming surrounding quote characters.
    pub fn push_import(&mut self, literal: &str) {
        let trimmed = literal.trim_matches(|c| c == '"' || c == '`');
        self.imports.push(trimmed.to_string());
    }

    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn module(&self) -> &str {
        &self.module
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.iter().map(PathBuf::as_path)
    }

    pub fn imports(&self) -> &[String] {
        &self.imports
    }
}
