//! Name registry - local path <-> canonical name.
//!
//! Modules and packages are known by two names: the workspace-relative
//! directory they live in (`./lib/util`) and the import path other code uses
//! to reach them (`example.com/lib/util`). The registry keeps both directions
//! in sync and refuses any binding that would break the one-to-one mapping.

use std::collections::HashMap;

use thiserror::Error;

/// A rejected registry binding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("`{local}` is already registered as `{existing}`, cannot register it as `{requested}`")]
    LocalPathTaken {
        local: String,
        existing: String,
        requested: String,
    },

    #[error("`{canonical}` is already provided by `{existing}`, cannot also map it to `{requested}`")]
    CanonicalNameTaken {
        canonical: String,
        existing: String,
        requested: String,
    },
}

/// Bijective mapping between local paths and canonical names.
#[derive(Debug, Clone, Default)]
pub struct NameRegistry {
    by_local: HashMap<String, String>,
    by_canonical: HashMap<String, String>,
}

impl NameRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `local` and `canonical` to each other.
    ///
    /// Re-inserting an existing pair is a no-op. Binding either side to a
    /// different counterpart fails and leaves the registry unchanged.
    pub fn insert(&mut self, local: &str, canonical: &str) -> Result<(), RegistryError> {
        if let Some(existing) = self.by_local.get(local) {
            if existing == canonical {
                return Ok(());
            }
            return Err(RegistryError::LocalPathTaken {
                local: local.to_string(),
                existing: existing.clone(),
                requested: canonical.to_string(),
            });
        }

        if let Some(existing) = self.by_canonical.get(canonical) {
            return Err(RegistryError::CanonicalNameTaken {
                canonical: canonical.to_string(),
                existing: existing.clone(),
                requested: local.to_string(),
            });
        }

        self.by_local.insert(local.to_string(), canonical.to_string());
        self.by_canonical
            .insert(canonical.to_string(), local.to_string());
        Ok(())
    }

    /// Canonical name bound to a local path.
    pub fn lookup_canonical(&self, local: &str) -> Option<&str> {
        self.by_local.get(local).map(String::as_str)
    }

    /// Local path bound to a canonical name.
    pub fn lookup_local(&self, canonical: &str) -> Option<&str> {
        self.by_canonical.get(canonical).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_local.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_local.is_empty()
    }

    /// All `(local, canonical)` pairs, sorted by local path.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        let mut pairs: Vec<_> = self
            .by_local
            .iter()
            .map(|(local, canonical)| (local.as_str(), canonical.as_str()))
            .collect();
        pairs.sort_unstable();
        pairs.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_directions() {
        let mut registry = NameRegistry::new();
        registry.insert("./lib", "example.com/lib").unwrap();

        assert_eq!(registry.lookup_canonical("./lib"), Some("example.com/lib"));
        assert_eq!(registry.lookup_local("example.com/lib"), Some("./lib"));
        assert_eq!(registry.lookup_local("example.com/other"), None);
        assert_eq!(registry.lookup_canonical("./other"), None);
    }

    #[test]
    fn test_identical_pair_is_idempotent() {
        let mut registry = NameRegistry::new();
        registry.insert("./lib", "example.com/lib").unwrap();
        registry.insert("./lib", "example.com/lib").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_rebinding_local_path_is_rejected() {
        let mut registry = NameRegistry::new();
        registry.insert("./lib", "example.com/lib").unwrap();

        let err = registry.insert("./lib", "example.com/lib/v2").unwrap_err();
        assert_eq!(
            err,
            RegistryError::LocalPathTaken {
                local: "./lib".to_string(),
                existing: "example.com/lib".to_string(),
                requested: "example.com/lib/v2".to_string(),
            }
        );
        assert_eq!(registry.lookup_canonical("./lib"), Some("example.com/lib"));
        assert_eq!(registry.lookup_local("example.com/lib/v2"), None);
    }

    #[test]
    fn test_rebinding_canonical_name_is_rejected() {
        let mut registry = NameRegistry::new();
        registry.insert("./lib", "example.com/lib").unwrap();

        let err = registry.insert("./fork", "example.com/lib").unwrap_err();
        assert!(matches!(err, RegistryError::CanonicalNameTaken { .. }));
        assert!(err.to_string().contains("./lib"));
        assert_eq!(registry.lookup_canonical("./fork"), None);
        assert_eq!(registry.lookup_local("example.com/lib"), Some("./lib"));
    }

    #[test]
    fn test_iter_is_sorted() {
        let mut registry = NameRegistry::new();
        registry.insert("./svc", "example.com/svc").unwrap();
        registry.insert("./lib", "example.com/lib").unwrap();

        let pairs: Vec<_> = registry.iter().collect();
        assert_eq!(
            pairs,
            vec![("./lib", "example.com/lib"), ("./svc", "example.com/svc")]
        );
        assert!(!registry.is_empty());
    }
}
