//! Test utilities for unit tests.
//!
//! Provides a builder for throwaway Go workspaces on disk.
//!
//! # Example
//!
//! ```rust,ignore
//! let fixture = WorkspaceFixture::new();
//! fixture
//!     .work(&["./svc", "./lib"])
//!     .module("svc", "example.com/svc", &["example.com/lib"])
//!     .module("lib", "example.com/lib", &[])
//!     .go_file("lib/util/util.go", "util", &["strings"]);
//! ```

use std::path::Path;

use tempfile::TempDir;

/// A Go workspace in a temporary directory, removed on drop.
pub struct WorkspaceFixture {
    dir: TempDir,
}

impl WorkspaceFixture {
    pub fn new() -> Self {
        WorkspaceFixture {
            dir: TempDir::new().expect("failed to create temp dir"),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Write `go.work` with the given `use` entries.
    pub fn work(&self, members: &[&str]) -> &Self {
        let mut text = String::from("go 1.22\n\nuse (\n");
        for member in members {
            text.push_str(&format!("\t{}\n", member));
        }
        text.push_str(")\n");
        self.file("go.work", &text)
    }

    /// Write `<dir>/go.mod` requiring each path at `v0.0.0`. An empty `dir`
    /// is the workspace root.
    pub fn module(&self, dir: &str, name: &str, requires: &[&str]) -> &Self {
        let mut text = format!("module {}\n\ngo 1.22\n", name);
        if !requires.is_empty() {
            text.push_str("\nrequire (\n");
            for require in requires {
                text.push_str(&format!("\t{} v0.0.0\n", require));
            }
            text.push_str(")\n");
        }

        let path = if dir.is_empty() {
            "go.mod".to_string()
        } else {
            format!("{}/go.mod", dir)
        };
        self.file(&path, &text)
    }

    /// Write a Go source file with a package clause and the given imports.
    pub fn go_file(&self, rel: &str, package: &str, imports: &[&str]) -> &Self {
        let mut text = format!("package {}\n", package);
        if !imports.is_empty() {
            text.push_str("\nimport (\n");
            for import in imports {
                text.push_str(&format!("\t\"{}\"\n", import));
            }
            text.push_str(")\n");
        }
        text.push_str("\nfunc init() {}\n");
        self.file(rel, &text)
    }

    /// Write an arbitrary file, creating parent directories.
    pub fn file(&self, rel: &str, content: &str) -> &Self {
        let path = self.root().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("failed to create fixture directory");
        }
        std::fs::write(&path, content).expect("failed to write fixture file");
        self
    }
}

impl Default for WorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_layout() {
        let fixture = WorkspaceFixture::new();
        fixture
            .work(&["."])
            .module("", "example.com/root", &["example.com/dep"])
            .go_file("cmd/main.go", "main", &["fmt"]);

        let root = fixture.root();
        let work = std::fs::read_to_string(root.join("go.work")).unwrap();
        assert!(work.contains("use (\n\t.\n)"));

        let module = std::fs::read_to_string(root.join("go.mod")).unwrap();
        assert!(module.starts_with("module example.com/root\n"));
        assert!(module.contains("\texample.com/dep v0.0.0\n"));

        let main = std::fs::read_to_string(root.join("cmd/main.go")).unwrap();
        assert!(main.contains("\t\"fmt\"\n"));
    }
}
