//! Summary statistics for an interaction graph.
//!
//! # Statistics Provided
//!
//! - **node_count** / **edge_count**: the two totals every report leads with.
//!   Self-loops count as edges.
//! - **density**: `edge_count / (n * (n - 1) / 2)` over non-loop edges; zero
//!   for graphs with fewer than two nodes.
//! - **component_count**: number of connected components.
//! - **isolated_node_count**: nodes without any non-loop neighbour.
//! - **self_loop_count**: degenerate edges tolerated at build time.
//! - **max_degree**: highest number of distinct neighbours of one node.

use petgraph::algo::connected_components;
use serde::Serialize;

use crate::graph::build::InteractionGraph;

/// Summary statistics for an [`InteractionGraph`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub node_count: usize,
    pub edge_count: usize,
    pub density: f64,
    pub component_count: usize,
    pub isolated_node_count: usize,
    pub self_loop_count: usize,
    pub max_degree: usize,
    pub content_hash: String,
}

impl GraphSummary {
    /// Compute statistics for `graph`.
    #[must_use]
    pub fn from_graph(graph: &InteractionGraph) -> Self {
        let node_count = graph.node_count();
        let edge_count = graph.edge_count();
        let self_loop_count = graph.self_loop_count();

        let degrees = (0..node_count).map(|i| graph.degree(i));
        let isolated_node_count = degrees.clone().filter(|&d| d == 0).count();
        let max_degree = degrees.max().unwrap_or(0);

        Self {
            node_count,
            edge_count,
            density: compute_density(node_count, edge_count - self_loop_count),
            // A self-loop never merges two components, so the petgraph count
            // is exact even with loops present.
            component_count: connected_components(graph.graph()),
            isolated_node_count,
            self_loop_count,
            max_degree,
            content_hash: graph.content_hash().to_string(),
        }
    }
}

/// Undirected density: `edges / (n * (n - 1) / 2)`.
#[allow(clippy::cast_precision_loss)]
fn compute_density(node_count: usize, edge_count: usize) -> f64 {
    if node_count < 2 {
        return 0.0;
    }
    let max_edges = (node_count * (node_count - 1) / 2) as f64;
    edge_count as f64 / max_edges
}
