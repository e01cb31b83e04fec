//! Betweenness centrality via Brandes' algorithm.
//!
//! # Overview
//!
//! Betweenness centrality measures how often a node lies on shortest paths
//! between other pairs of nodes. High-betweenness actors are "bridges"
//! between sub-communities; removing them would lengthen or cut the paths
//! between the groups they connect.
//!
//! # Algorithm
//!
//! Brandes (2001) for unweighted graphs:
//!
//! 1. For each source node `s`, run BFS to compute shortest-path counts
//!    (`sigma`) and distances.
//! 2. Accumulate dependency scores in reverse BFS order (farthest nodes first).
//!    When several shortest paths reach `w`, each predecessor `v` receives the
//!    share `sigma[v] / sigma[w]` of `w`'s dependency.
//! 3. Sum the dependency scores across all source nodes.
//!
//! Complexity: O(V * E).
//!
//! # Normalization
//!
//! Summing over every source counts each unordered pair `{s, t}` twice, so
//! the raw sum is divided by `(n - 1) * (n - 2)`. That equals the undirected
//! pair count normalization `2 / ((n - 1)(n - 2))` applied to the halved sum.
//! Graphs with fewer than three nodes score every node 0.0.

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::InteractionGraph;
use crate::metrics::{ScoreMap, label_scores};

/// Compute normalized betweenness centrality for every actor.
///
/// Disconnected nodes and nodes that no shortest path passes through
/// receive a score of 0.0.
#[must_use]
#[instrument(skip(graph))]
#[allow(clippy::cast_precision_loss)]
pub fn betweenness_centrality(graph: &InteractionGraph) -> ScoreMap {
    let n = graph.node_count();

    // Node-indexed betweenness accumulator.
    let mut cb: Vec<f64> = vec![0.0; n];

    if n < 3 {
        return label_scores(graph, &cb);
    }

    // Buffers reused across sources.
    let mut stack: Vec<usize> = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma: Vec<f64> = vec![0.0; n];
    let mut dist: Vec<Option<usize>> = vec![None; n];
    let mut delta: Vec<f64> = vec![0.0; n];
    let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

    for s in 0..n {
        stack.clear();
        predecessors.iter_mut().for_each(Vec::clear);
        sigma.fill(0.0);
        dist.fill(None);
        delta.fill(0.0);

        sigma[s] = 1.0;
        dist[s] = Some(0);
        queue.push_back(s);

        while let Some(v) = queue.pop_front() {
            stack.push(v);
            let dv = dist[v].unwrap_or_default();

            for &w in graph.neighbors(v) {
                // First visit to w?
                if dist[w].is_none() {
                    dist[w] = Some(dv + 1);
                    queue.push_back(w);
                }

                // Shortest path to w via v?
                if dist[w] == Some(dv + 1) {
                    sigma[w] += sigma[v];
                    predecessors[w].push(v);
                }
            }
        }

        // Accumulate dependencies in reverse BFS order.
        while let Some(w) = stack.pop() {
            for &v in &predecessors[w] {
                delta[v] += (sigma[v] / sigma[w]) * (1.0 + delta[w]);
            }
            if w != s {
                cb[w] += delta[w];
            }
        }
    }

    let scale = 1.0 / ((n - 1) * (n - 2)) as f64;
    for score in &mut cb {
        *score *= scale;
    }

    label_scores(graph, &cb)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
