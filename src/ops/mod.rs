//! High-level operations.
//!
//! This module contains the implementation behind the CLI commands.

pub mod depgraph;

pub use depgraph::{compute_dependency_graph, DependencyReport};
