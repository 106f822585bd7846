//! Module-level dependency graph.

use std::collections::{BTreeMap, HashSet};

use crate::core::{Module, NameRegistry};
use crate::resolver::errors::DepGraphError;
use crate::resolver::graph::DepGraph;
use crate::util::config::RelativeFallback;
use crate::util::fs::is_relative_dependency;

/// Dependencies between workspace members.
#[derive(Debug, Clone)]
pub struct ModuleGraph {
    graph: DepGraph,
    members: Vec<String>,
}

impl ModuleGraph {
    /// Build the graph from resolved manifests.
    ///
    /// A dependency becomes an edge when it is the module path of a member,
    /// or when it is a relative path accepted by `fallback`. Anything else is
    /// external. Edge failures are fatal.
    pub fn build(
        modules: &[Module],
        registry: &NameRegistry,
        fallback: RelativeFallback,
    ) -> Result<Self, DepGraphError> {
        let members: Vec<String> = modules.iter().map(|m| m.local_path().to_string()).collect();
        let member_set: HashSet<&str> = members.iter().map(String::as_str).collect();

        let mut graph = DepGraph::new();
        for module in modules {
            for dep in module.dependencies() {
                let Some(target) = resolve_target(dep, registry, &member_set, fallback) else {
                    tracing::debug!("{}: dropping external dependency {}", module.local_path(), dep);
                    continue;
                };

                graph
                    .depend_on(module.local_path(), target)
                    .map_err(|source| DepGraphError::Edge {
                        from: module.local_path().to_string(),
                        to: target.to_string(),
                        source,
                    })?;
            }
        }

        tracing::debug!(
            "module graph: {} members ({} linked), {} edges",
            members.len(),
            graph.node_count(),
            graph.edge_count()
        );
        Ok(ModuleGraph { graph, members })
    }

    /// Members confirmed by manifest resolution, in workspace order.
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Direct dependencies of a member.
    pub fn dependencies(&self, member: &str) -> Vec<&str> {
        self.graph.dependencies(member)
    }

    /// Member -> sorted direct dependencies. Members without dependencies
    /// are left out.
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.members
            .iter()
            .filter_map(|member| {
                let deps = self.dependencies(member);
                if deps.is_empty() {
                    None
                } else {
                    Some((
                        member.clone(),
                        deps.into_iter().map(str::to_string).collect(),
                    ))
                }
            })
            .collect()
    }
}

fn resolve_target<'a>(
    dep: &'a str,
    registry: &'a NameRegistry,
    members: &HashSet<&str>,
    fallback: RelativeFallback,
) -> Option<&'a str> {
    if let Some(local) = registry.lookup_local(dep) {
        if members.contains(local) {
            return Some(local);
        }
    }

    match fallback {
        RelativeFallback::Members if is_relative_dependency(dep) || dep == "." => {
            members.contains(dep).then_some(dep)
        }
        RelativeFallback::Literal if is_relative_dependency(dep) => Some(dep),
        _ => None,
    }
}
