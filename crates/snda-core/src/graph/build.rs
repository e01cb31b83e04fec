//! Graph construction from interaction edges.
//!
//! # Overview
//!
//! [`InteractionGraph::build`] turns a sequence of [`Edge`]s into an
//! undirected simple graph backed by [`petgraph`]. Repeated interactions
//! between the same pair collapse into a single edge regardless of
//! orientation or timestamp.
//!
//! ## Node Order
//!
//! Nodes are numbered in order of first appearance (`source` before `target`
//! within an edge). Every score map produced by [`crate::metrics`] iterates in
//! this order, which is what makes ranking ties reproducible.
//!
//! ## Self-loops
//!
//! An edge whose endpoints are equal is kept in the petgraph store and counted
//! by [`InteractionGraph::edge_count`], but it is left out of the neighbour
//! lists the centrality algorithms read. A self-loop therefore contributes
//! nothing to any centrality score, and a node whose only edge is a self-loop
//! behaves as an isolated node.
//!
//! ## Content Hash
//!
//! The graph carries a BLAKE3 hash of its canonical edge set (sorted,
//! orientation-free pairs). Two graphs built from the same interactions hash
//! equal no matter how the input was ordered or how often pairs repeated.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet};

use petgraph::graph::{NodeIndex, UnGraph};
use tracing::{debug, instrument};

use crate::edge::{Edge, canonical_pair};

// ---------------------------------------------------------------------------
// InteractionGraph
// ---------------------------------------------------------------------------

/// An immutable undirected interaction graph.
///
/// Nodes are actor identifiers; an edge means the two actors interacted at
/// least once. Construct with [`InteractionGraph::build`]; there is no way to
/// mutate the graph afterwards.
#[derive(Debug, Clone)]
pub struct InteractionGraph {
    graph: UnGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    /// Deduplicated, self-loop-free neighbour lists indexed by node index.
    adjacency: Vec<Vec<usize>>,
    self_loops: usize,
    content_hash: String,
}

impl InteractionGraph {
    /// Build a graph from interaction edges.
    ///
    /// An empty input yields an empty graph.
    #[must_use]
    #[instrument(skip(edges))]
    pub fn build<'a, I>(edges: I) -> Self
    where
        I: IntoIterator<Item = &'a Edge>,
    {
        Self::from_pairs(
            edges
                .into_iter()
                .map(|e| (e.source.as_str(), e.target.as_str())),
        )
    }

    /// Build a graph from bare endpoint pairs.
    #[must_use]
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::from_nodes_and_pairs(std::iter::empty(), pairs)
    }

    /// Build a graph from an explicit node list plus endpoint pairs.
    ///
    /// Listed nodes are added first (in order) so they exist even without
    /// edges; pair endpoints not in the list are appended as they appear.
    #[must_use]
    pub fn from_nodes_and_pairs<'a, N, I>(nodes: N, pairs: I) -> Self
    where
        N: IntoIterator<Item = &'a str>,
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut graph = UnGraph::<String, ()>::new_undirected();
        let mut node_map: HashMap<String, NodeIndex> = HashMap::new();
        let mut adjacency: Vec<Vec<usize>> = Vec::new();
        let mut self_loops = 0usize;
        let mut canonical: Vec<(String, String)> = Vec::new();
        // Index pairs stored as (min, max); petgraph's `find_edge` walks the
        // adjacency list and would make hubs quadratic to build.
        let mut seen: HashSet<(usize, usize)> = HashSet::new();

        let mut intern = |id: &str,
                          graph: &mut UnGraph<String, ()>,
                          adjacency: &mut Vec<Vec<usize>>|
         -> NodeIndex {
            if let Some(&idx) = node_map.get(id) {
                return idx;
            }
            let idx = graph.add_node(id.to_string());
            node_map.insert(id.to_string(), idx);
            adjacency.push(Vec::new());
            idx
        };

        for id in nodes {
            intern(id, &mut graph, &mut adjacency);
        }

        for (a, b) in pairs {
            let ia = intern(a, &mut graph, &mut adjacency);
            let ib = intern(b, &mut graph, &mut adjacency);

            let key = (ia.index().min(ib.index()), ia.index().max(ib.index()));
            if !seen.insert(key) {
                continue;
            }
            graph.add_edge(ia, ib, ());

            if ia == ib {
                self_loops += 1;
            } else {
                adjacency[ia.index()].push(ib.index());
                adjacency[ib.index()].push(ia.index());
            }

            let (lo, hi) = canonical_pair(a, b);
            canonical.push((lo.to_string(), hi.to_string()));
        }

        canonical.sort_unstable();
        let content_hash = compute_edge_hash(&canonical);

        debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            self_loops,
            "interaction graph built"
        );

        Self {
            graph,
            node_map,
            adjacency,
            self_loops,
            content_hash,
        }
    }

    /// Return the number of nodes (actors) in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of distinct undirected edges, self-loops included.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return the number of self-loop edges.
    #[must_use]
    pub const fn self_loop_count(&self) -> usize {
        self.self_loops
    }

    /// `true` when the graph has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the dense index of an actor.
    #[must_use]
    pub fn node_index(&self, actor: &str) -> Option<usize> {
        self.node_map.get(actor).map(|idx| idx.index())
    }

    /// Return the actor label for a dense node index.
    #[must_use]
    pub fn node_id(&self, index: usize) -> Option<&str> {
        self.graph
            .node_weight(NodeIndex::new(index))
            .map(String::as_str)
    }

    /// Iterate actor labels in node order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .map(String::as_str)
    }

    /// Neighbours of a node (dense indices, no self, no duplicates).
    #[must_use]
    pub fn neighbors(&self, index: usize) -> &[usize] {
        self.adjacency
            .get(index)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Number of distinct non-self neighbours of a node.
    #[must_use]
    pub fn degree(&self, index: usize) -> usize {
        self.neighbors(index).len()
    }

    /// The underlying petgraph store.
    #[must_use]
    pub const fn graph(&self) -> &UnGraph<String, ()> {
        &self.graph
    }

    /// BLAKE3 hash of the canonical edge set.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Compute a BLAKE3 hash of the sorted canonical edge list.
fn compute_edge_hash(edges: &[(String, String)]) -> String {
    let mut hasher = blake3::Hasher::new();
    for (a, b) in edges {
        hasher.update(a.as_bytes());
        hasher.update(b"\x00");
        hasher.update(b.as_bytes());
        hasher.update(b"\x00");
    }
    format!("blake3:{}", hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
