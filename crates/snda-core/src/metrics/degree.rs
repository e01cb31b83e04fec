//! Degree centrality.
//!
//! The fraction of all other actors a node interacts with directly:
//! `deg(v) / (n - 1)`. Degrees count distinct non-self neighbours, so scores
//! stay in `[0, 1]` even when the input contained self-loops.

use tracing::instrument;

use crate::graph::InteractionGraph;
use crate::metrics::{ScoreMap, label_scores};

/// Compute degree centrality for every actor.
///
/// Graphs with at most one node score every node 0.0 (an empty graph yields
/// an empty map).
#[must_use]
#[instrument(skip(graph))]
#[allow(clippy::cast_precision_loss)]
pub fn degree_centrality(graph: &InteractionGraph) -> ScoreMap {
    let n = graph.node_count();
    let scores: Vec<f64> = if n <= 1 {
        vec![0.0; n]
    } else {
        let denom = (n - 1) as f64;
        (0..n).map(|i| graph.degree(i) as f64 / denom).collect()
    };
    label_scores(graph, &scores)
}
