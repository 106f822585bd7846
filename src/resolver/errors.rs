//! Pipeline error types and diagnostics.

use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::core::manifest::{ManifestParseError, WORKSPACE_MANIFEST};
use crate::core::registry::RegistryError;
use crate::resolver::graph::GraphError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// Where a fatal error happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    LoadWorkspace,
    ResolveManifest { module: String },
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::LoadWorkspace => write!(f, "loading the workspace"),
            Phase::ResolveManifest { module } => write!(f, "resolving module `{}`", module),
        }
    }
}

/// Fatal error computing the dependency graph.
#[derive(Debug, Error)]
pub enum DepGraphError {
    #[error("{} not found in {}", WORKSPACE_MANIFEST, root.display())]
    WorkspaceManifestNotFound { root: PathBuf },

    #[error("failed to read {} while {phase}", path.display())]
    Read {
        phase: Phase,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {} while {phase}", path.display())]
    Parse {
        phase: Phase,
        path: PathBuf,
        #[source]
        source: Box<ManifestParseError>,
    },

    #[error("conflicting module identity while {phase}")]
    Registry {
        phase: Phase,
        #[source]
        source: RegistryError,
    },

    #[error("failed to add dependency {from} -> {to}")]
    Edge {
        from: String,
        to: String,
        #[source]
        source: GraphError,
    },
}

impl DepGraphError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            DepGraphError::WorkspaceManifestNotFound { root } => {
                Diagnostic::error(self.to_string())
                    .with_location(root.clone())
                    .with_suggestion(suggestions::NO_WORKSPACE)
            }

            DepGraphError::Read {
                phase,
                path,
                source,
            } => {
                let diag = Diagnostic::error(self.to_string())
                    .with_location(path.clone())
                    .with_context(source.to_string());
                match (phase, source.kind()) {
                    (Phase::ResolveManifest { .. }, io::ErrorKind::NotFound) => {
                        diag.with_suggestion(suggestions::MISSING_MODULE)
                    }
                    _ => diag,
                }
            }

            DepGraphError::Parse { path, source, .. } => Diagnostic::error(self.to_string())
                .with_location(path.clone())
                .with_context(format!("line {}: {}", source.line, source.message))
                .with_suggestion(suggestions::FIX_MANIFEST),

            DepGraphError::Registry { source, .. } => Diagnostic::error(self.to_string())
                .with_context(source.to_string())
                .with_suggestion(suggestions::DUPLICATE_MODULE),

            DepGraphError::Edge { source, .. } => {
                let diag = Diagnostic::error(self.to_string()).with_context(source.to_string());
                match source {
                    GraphError::Cycle { .. } => diag.with_suggestion(suggestions::BREAK_CYCLE),
                    GraphError::SelfDependency { .. } => diag,
                }
            }
        }
    }
}
