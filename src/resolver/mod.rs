//! Dependency resolution.
//!
//! Turns raw dependency strings into graph edges in two passes: module
//! manifests first, then package imports. Both passes resolve strings through
//! the same [`NameRegistry`](crate::core::NameRegistry) and drop anything that
//! does not name a workspace-local entity.

pub mod errors;
pub mod graph;
pub mod manifest;
pub mod modules;
pub mod packages;

pub use errors::{DepGraphError, Phase};
pub use graph::{DepGraph, GraphError};
pub use manifest::resolve_manifests;
pub use modules::ModuleGraph;
pub use packages::PackageGraph;
