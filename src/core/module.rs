//! Module - one workspace member with its own manifest.

/// A workspace member module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Workspace-relative root path (`./lib`)
    local_path: String,

    /// Module path declared in `go.mod`
    canonical_name: String,

    /// Raw dependency specifiers: normalized `require` paths followed by
    /// normalized `replace` targets. Duplicates are kept.
    dependencies: Vec<String>,
}

impl Module {
    pub fn new(local_path: impl Into<String>, canonical_name: impl Into<String>) -> Self {
        Module {
            local_path: local_path.into(),
            canonical_name: canonical_name.into(),
            dependencies: Vec::new(),
        }
    }

    /// Append a dependency specifier.
    pub fn push_dependency(&mut self, dep: impl Into<String>) {
        self.dependencies.push(dep.into());
    }

    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    pub fn canonical_name(&self) -> &str {
        &self.canonical_name
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }
}
