//! Closeness centrality via breadth-first search.
//!
//! # Algorithm
//!
//! For every node `u`, one BFS yields hop distances to each reachable node.
//! With `r` the number of reachable nodes (including `u`) and `total` the sum
//! of those distances, the Wasserman–Faust score is
//!
//! ```text
//! closeness(u) = (r - 1) / total * (r - 1) / (n - 1)
//! ```
//!
//! The second factor scales down nodes that only reach a small part of a
//! disconnected graph. A node that reaches nobody scores 0.0.
//!
//! Complexity: O(V * (V + E)).

use std::collections::VecDeque;

use tracing::instrument;

use crate::graph::InteractionGraph;
use crate::metrics::{ScoreMap, label_scores};

/// Compute closeness centrality for every actor.
#[must_use]
#[instrument(skip(graph))]
#[allow(clippy::cast_precision_loss)]
pub fn closeness_centrality(graph: &InteractionGraph) -> ScoreMap {
    let n = graph.node_count();
    let mut scores = vec![0.0; n];

    if n > 1 {
        let mut dist: Vec<Option<usize>> = vec![None; n];
        let mut queue: VecDeque<usize> = VecDeque::with_capacity(n);

        for (u, score) in scores.iter_mut().enumerate() {
            dist.fill(None);
            dist[u] = Some(0);
            queue.push_back(u);

            let mut reachable = 0usize;
            let mut total = 0usize;

            while let Some(v) = queue.pop_front() {
                let dv = dist[v].unwrap_or_default();
                reachable += 1;
                total += dv;

                for &w in graph.neighbors(v) {
                    if dist[w].is_none() {
                        dist[w] = Some(dv + 1);
                        queue.push_back(w);
                    }
                }
            }

            if total > 0 {
                let others = (reachable - 1) as f64;
                *score = (others / total as f64) * (others / (n - 1) as f64);
            }
        }
    }

    label_scores(graph, &scores)
}
