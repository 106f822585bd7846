//! gowork-depgraph - package dependency graphs for Go workspaces
//!
//! This crate reads a `go.work` workspace, resolves each member's `go.mod`,
//! scans the imports of every package and reports which workspace-local
//! packages depend on which.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities for unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// builds temporary Go workspaces on disk.
#[cfg(test)]
pub mod test_support;

pub use core::{
    module::Module, package::Package, registry::NameRegistry, workspace::Workspace,
};

pub use ops::{compute_dependency_graph, DependencyReport};
pub use resolver::DepGraphError;
pub use util::config::Config;
