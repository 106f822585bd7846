//! Package sources.
//!
//! Sources turn a member module's directory tree into packages: directories
//! of Go files, each with the import paths its files declare.

pub mod extract;
pub mod imports;

pub use extract::extract_packages;
pub use imports::{scan_imports, ImportScanError};
