//! Bring-up and tear-down ordering
//!
//! Builds a dependency graph (parent -> dependent) and sorts it
//! topologically, the same way jails are ordered by `depends_on`.

use super::ConfigurationSet;
use crate::error::{Error, Result};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use tracing::debug;

impl ConfigurationSet {
    /// Interface names ordered so every parent comes before its dependents
    ///
    /// Nodes are inserted in name order, so the result is stable for a
    /// given configuration. Unlike the closure queries this rejects cycles.
    pub fn bring_up_order(&self) -> Result<Vec<&str>> {
        let mut graph: DiGraph<&str, ()> = DiGraph::new();
        let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

        // Add nodes for each interface
        for name in self.names() {
            node_map.insert(name, graph.add_node(name));
        }

        // Add edges for parents (parent -> interface)
        for (name, iface) in self.iter() {
            let to = node_map
                .get(name)
                .copied()
                .ok_or_else(|| Error::MissingInterface(name.to_string()))?;
            for parent in iface.parent_names() {
                let from = node_map
                    .get(parent.as_str())
                    .copied()
                    .ok_or_else(|| Error::MissingInterface(parent.clone()))?;
                graph.add_edge(from, to, ());
            }
        }

        let order: Vec<&str> = toposort(&graph, None)
            .map(|nodes| nodes.iter().map(|n| graph[*n]).collect())
            .map_err(|cycle| Error::DependencyCycle(graph[cycle.node_id()].to_string()))?;
        debug!(count = order.len(), "computed interface bring-up order");

        Ok(order)
    }

    /// Reverse of `bring_up_order`: dependents before their parents
    pub fn tear_down_order(&self) -> Result<Vec<&str>> {
        let mut order = self.bring_up_order()?;
        order.reverse();
        Ok(order)
    }
}
