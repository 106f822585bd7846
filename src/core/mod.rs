//! Core data structures.
//!
//! This module contains the foundational types used throughout the crate:
//! - Workspace loading and manifests (`go.work`, `go.mod`)
//! - Modules and packages
//! - The local path <-> canonical name registry

pub mod manifest;
pub mod module;
pub mod package;
pub mod registry;
pub mod workspace;

pub use manifest::{ModFile, WorkFile, MODULE_MANIFEST, WORKSPACE_MANIFEST};
pub use module::Module;
pub use package::Package;
pub use registry::{NameRegistry, RegistryError};
pub use workspace::Workspace;
