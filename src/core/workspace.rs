//! Workspace - the root directory and its member modules.
//!
//! A Workspace is loaded once from `go.work` and never changes afterwards.

use std::path::{Path, PathBuf};

use crate::core::manifest::{WorkFile, WORKSPACE_MANIFEST};
use crate::resolver::errors::{DepGraphError, Phase};
use crate::util::fs::{clean_path, normalize_member_path};

/// A Go workspace.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Absolute, canonicalized workspace root
    root: PathBuf,

    /// Go version declared by the workspace manifest
    go_version: Option<String>,

    /// Member module paths (`./lib`), in declaration order
    members: Vec<String>,
}

impl Workspace {
    /// Load the workspace rooted at `root`.
    pub fn load(root: &Path) -> Result<Self, DepGraphError> {
        let not_found = || DepGraphError::WorkspaceManifestNotFound {
            root: root.to_path_buf(),
        };

        let root = root.canonicalize().map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                not_found()
            } else {
                DepGraphError::Read {
                    phase: Phase::LoadWorkspace,
                    path: root.to_path_buf(),
                    source,
                }
            }
        })?;
        let manifest_path = root.join(WORKSPACE_MANIFEST);
        if !manifest_path.is_file() {
            return Err(not_found());
        }

        let text = std::fs::read_to_string(&manifest_path).map_err(|source| {
            DepGraphError::Read {
                phase: Phase::LoadWorkspace,
                path: manifest_path.clone(),
                source,
            }
        })?;

        let work = WorkFile::parse(&manifest_path.display().to_string(), &text).map_err(
            |source| DepGraphError::Parse {
                phase: Phase::LoadWorkspace,
                path: manifest_path.clone(),
                source: Box::new(source),
            },
        )?;

        Ok(Self::from_work_file(root, work))
    }

    fn from_work_file(root: PathBuf, work: WorkFile) -> Self {
        let mut members: Vec<String> = Vec::with_capacity(work.uses.len());
        for raw in &work.uses {
            let member = normalize_member_path(&root, raw);
            if members.contains(&member) {
                tracing::debug!("ignoring repeated workspace member {}", member);
                continue;
            }
            members.push(member);
        }

        Workspace {
            root,
            go_version: work.go_version,
            members,
        }
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the workspace manifest path.
    pub fn manifest_path(&self) -> PathBuf {
        self.root.join(WORKSPACE_MANIFEST)
    }

    pub fn go_version(&self) -> Option<&str> {
        self.go_version.as_deref()
    }

    /// Member module paths in declaration order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Absolute directory of a member.
    pub fn member_dir(&self, member: &str) -> PathBuf {
        clean_path(&self.root.join(member))
    }
}
