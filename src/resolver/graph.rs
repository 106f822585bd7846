//! Directed dependency graph keyed by string identities.
//!
//! Nodes come into existence with the first edge that names them. Inserting
//! an edge twice is a no-op; an edge from a node to itself, or one that would
//! close a cycle, is rejected and leaves the graph unchanged.

use std::collections::HashMap;

use petgraph::algo::has_path_connecting;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use thiserror::Error;

/// A rejected edge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("`{node}` cannot depend on itself")]
    SelfDependency { node: String },

    #[error("`{to}` already depends on `{from}`, adding `{from}` -> `{to}` would create a dependency cycle")]
    Cycle { from: String, to: String },
}

/// Dependency graph: an edge `a -> b` means `a` depends on `b`.
#[derive(Debug, Clone, Default)]
pub struct DepGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl DepGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `from` depends on `to`.
    pub fn depend_on(&mut self, from: &str, to: &str) -> Result<(), GraphError> {
        if from == to {
            return Err(GraphError::SelfDependency {
                node: from.to_string(),
            });
        }

        if let (Some(&from_node), Some(&to_node)) = (self.nodes.get(from), self.nodes.get(to)) {
            if self.graph.contains_edge(from_node, to_node) {
                return Ok(());
            }
            if has_path_connecting(&self.graph, to_node, from_node, None) {
                return Err(GraphError::Cycle {
                    from: from.to_string(),
                    to: to.to_string(),
                });
            }
        }

        let from_node = self.node(from);
        let to_node = self.node(to);
        self.graph.add_edge(from_node, to_node, ());
        Ok(())
    }

    fn node(&mut self, id: &str) -> NodeIndex {
        if let Some(&node) = self.nodes.get(id) {
            return node;
        }
        let node = self.graph.add_node(id.to_string());
        self.nodes.insert(id.to_string(), node);
        node
    }

    /// Direct dependencies of `id`, sorted. Unknown nodes have none.
    pub fn dependencies(&self, id: &str) -> Vec<&str> {
        let Some(&node) = self.nodes.get(id) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .map(|n| self.graph[n].as_str())
            .collect();
        out.sort_unstable();
        out
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}
