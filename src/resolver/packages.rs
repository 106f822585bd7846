//! Package-level dependency graph.

use std::collections::{BTreeMap, HashSet};

use crate::core::{NameRegistry, Package};
use crate::resolver::graph::DepGraph;
use crate::util::diagnostic::Diagnostic;

/// Import edges between workspace-local packages, keyed by local path.
#[derive(Debug, Clone)]
pub struct PackageGraph {
    graph: DepGraph,
    /// (local path, canonical name) of every discovered package
    packages: Vec<(String, String)>,
}

impl PackageGraph {
    /// Build the graph from extracted packages.
    ///
    /// An import becomes an edge only when it names a discovered package.
    /// Rejected edges (self-imports, import cycles) are reported as warnings.
    pub fn build(
        packages: &[Package],
        registry: &NameRegistry,
        warnings: &mut Vec<Diagnostic>,
    ) -> Self {
        let known: HashSet<&str> = packages.iter().map(Package::local_path).collect();

        let mut graph = DepGraph::new();
        for package in packages {
            for import in package.imports() {
                let Some(target) = registry.lookup_local(import) else {
                    continue;
                };
                if !known.contains(target) {
                    continue;
                }

                if let Err(err) = graph.depend_on(package.local_path(), target) {
                    tracing::warn!("{}: skipped import {}: {}", package.canonical_name(), import, err);
                    warnings.push(
                        Diagnostic::warning(format!(
                            "skipped import of `{}` in package `{}`",
                            import,
                            package.canonical_name()
                        ))
                        .with_context(err.to_string())
                        .with_context(format!("declared in module `{}`", package.module())),
                    );
                }
            }
        }

        tracing::debug!(
            "package graph: {} packages ({} linked), {} edges",
            packages.len(),
            graph.node_count(),
            graph.edge_count()
        );

        PackageGraph {
            graph,
            packages: packages
                .iter()
                .map(|p| (p.local_path().to_string(), p.canonical_name().to_string()))
                .collect(),
        }
    }

    /// Direct dependencies of a package, by local path.
    pub fn dependencies(&self, local_path: &str) -> Vec<&str> {
        self.graph.dependencies(local_path)
    }

    /// Canonical package name -> sorted canonical names of its workspace-local
    /// dependencies. Every discovered package has a key.
    pub fn to_map(&self, registry: &NameRegistry) -> BTreeMap<String, Vec<String>> {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for (local, canonical) in &self.packages {
            let deps = map.entry(canonical.clone()).or_default();
            for dep in self.dependencies(local) {
                let name = registry.lookup_canonical(dep).unwrap_or(dep);
                deps.push(name.to_string());
            }
        }

        for deps in map.values_mut() {
            deps.sort_unstable();
            deps.dedup();
        }
        map
    }
}
