//! Eigenvector centrality via power iteration.
//!
//! # Overview
//!
//! Eigenvector centrality scores nodes based on the idea that connections to
//! high-scoring nodes contribute more to a node's score. It's the dominant
//! eigenvector of the adjacency matrix.
//!
//! # Algorithm
//!
//! Power iteration on the adjacency matrix shifted by the identity:
//!
//! 1. Initialize scores uniformly to `1 / n`.
//! 2. For each node `v`: `next(v) = score(v) + sum of score(u) for u ~ v`.
//! 3. Normalize the score vector to unit L2 norm.
//! 4. Stop once the L1 distance between successive vectors drops below the
//!    tolerance, or fail after `max_iter` rounds.
//!
//! The tolerance is absolute: it is not multiplied by the node count, as
//! networkx's `eigenvector_centrality` does. A large graph therefore needs
//! more rounds to meet the same tolerance than it would under networkx, and
//! may exhaust a budget networkx would not. Loosen `tolerance` or enable
//! retries for such datasets.
//!
//! `A + I` has the same eigenvectors as `A`, and its dominant eigenvalue is
//! strictly largest in magnitude. Without the shift, bipartite graphs (stars,
//! even cycles, trees) alternate between two vectors forever.
//!
//! # Output
//!
//! Returns a [`ScoreMap`] with non-negative scores of unit L2 norm, or
//! [`CoreError::ConvergenceFailure`] when the iteration budget runs out.
//! Callers decide how to degrade; see [`crate::report`].

use tracing::{debug, instrument, warn};

use crate::error::CoreError;
use crate::graph::InteractionGraph;
use crate::metrics::{ScoreMap, label_scores};

/// Scores plus the number of power-iteration rounds it took to settle.
#[derive(Debug, Clone)]
pub struct EigenvectorResult {
    /// Eigenvector centrality scores: actor → score.
    pub scores: ScoreMap,
    /// Number of iterations performed.
    pub iterations: usize,
}

/// Compute eigenvector centrality for every actor.
///
/// # Errors
///
/// Returns [`CoreError::ConvergenceFailure`] if the L1 change between two
/// successive iterates is still at least `tolerance` after `max_iter`
/// iterations.
#[instrument(skip(graph))]
pub fn eigenvector_centrality(
    graph: &InteractionGraph,
    max_iter: usize,
    tolerance: f64,
) -> Result<ScoreMap, CoreError> {
    eigenvector_with_stats(graph, max_iter, tolerance).map(|result| result.scores)
}

/// Like [`eigenvector_centrality`], also reporting the iteration count.
///
/// # Errors
///
/// Returns [`CoreError::ConvergenceFailure`] if the iteration does not settle
/// within `max_iter` rounds.
#[allow(clippy::cast_precision_loss)]
pub fn eigenvector_with_stats(
    graph: &InteractionGraph,
    max_iter: usize,
    tolerance: f64,
) -> Result<EigenvectorResult, CoreError> {
    let n = graph.node_count();

    if n == 0 {
        return Ok(EigenvectorResult {
            scores: ScoreMap::new(),
            iterations: 0,
        });
    }

    let mut scores: Vec<f64> = vec![1.0 / n as f64; n];
    let mut next: Vec<f64> = vec![0.0; n];

    for iter in 0..max_iter {
        for (v, slot) in next.iter_mut().enumerate() {
            *slot = scores[v] + graph.neighbors(v).iter().map(|&u| scores[u]).sum::<f64>();
        }

        // Normalize to unit L2 norm.
        let norm: f64 = next.iter().map(|x| x * x).sum::<f64>().sqrt();
        if norm > 0.0 {
            for x in &mut next {
                *x /= norm;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(next.iter())
            .map(|(a, b)| (a - b).abs())
            .sum();

        std::mem::swap(&mut scores, &mut next);

        if diff < tolerance {
            // Perron–Frobenius: the principal vector can be chosen
            // non-negative. Flip if rounding left it pointing the other way.
            if scores.iter().sum::<f64>() < 0.0 {
                for x in &mut scores {
                    *x = -*x;
                }
            }
            debug!(iterations = iter + 1, "eigenvector centrality converged");
            return Ok(EigenvectorResult {
                scores: label_scores(graph, &scores),
                iterations: iter + 1,
            });
        }
    }

    warn!(max_iter, tolerance, "eigenvector centrality did not converge");
    Err(CoreError::ConvergenceFailure {
        iterations: max_iter,
        tolerance,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn l2(scores: &ScoreMap) -> f64 {
        scores.values().map(|x| x * x).sum::<f64>().sqrt()
    }

    #[test]
    fn empty_graph_returns_empty() {
        let g = InteractionGraph::from_pairs(std::iter::empty());
        let result = eigenvector_with_stats(&g, 100, 1e-6).expect("empty converges");
        assert!(result.scores.is_empty());
        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn single_node_has_unit_score() {
        let g = InteractionGraph::from_pairs([("A", "A")]);
        let scores = eigenvector_centrality(&g, 100, 1e-6).expect("converges");
        assert!((scores["A"] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn simple_pair_equal_scores() {
        let g = InteractionGraph::from_pairs([("A", "B")]);
        let scores = eigenvector_centrality(&g, 100, 1e-6).expect("pair converges");
        assert!((scores["A"] - scores["B"]).abs() < 1e-6);
        assert!((scores["A"] - 1.0 / 2f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn star_converges_and_center_is_highest() {
        // A plain adjacency power iteration oscillates on a star.
        let g = InteractionGraph::from_pairs([("A", "B"), ("A", "C"), ("A", "D")]);
        let scores = eigenvector_centrality(&g, 1000, 1e-8).expect("star converges");

        assert!(scores["A"] > scores["B"]);
        assert!((scores["B"] - scores["C"]).abs() < 1e-6);
        assert!((scores["C"] - scores["D"]).abs() < 1e-6);
        // Principal eigenvector of K1,3: center / leaf = sqrt(3).
        assert!((scores["A"] / scores["B"] - 3f64.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn chain_middle_nodes_highest() {
        let g = InteractionGraph::from_pairs([("A", "B"), ("B", "C"), ("C", "D")]);
        let scores = eigenvector_centrality(&g, 1000, 1e-8).expect("path converges");
        assert!(scores["B"] > scores["A"]);
        assert!(scores["C"] > scores["D"]);
        assert!((scores["B"] - scores["C"]).abs() < 1e-6);
    }

    #[test]
    fn result_has_unit_norm_and_is_non_negative() {
        let g = InteractionGraph::from_pairs([("A", "B"), ("B", "C"), ("A", "C"), ("C", "D")]);
        let scores = eigenvector_centrality(&g, 1000, 1e-6).expect("converges");
        assert!((l2(&scores) - 1.0).abs() < 1e-9);
        for (id, score) in &scores {
            assert!(*score >= 0.0, "Score for {id} should be non-negative: {score}");
        }
    }

    #[test]
    fn tiny_budget_reports_convergence_failure() {
        let g = InteractionGraph::from_pairs([("A", "B"), ("A", "C"), ("A", "D"), ("D", "E")]);
        let err = eigenvector_centrality(&g, 1, 1e-12).expect_err("one round cannot settle");
        assert_eq!(
            err,
            CoreError::ConvergenceFailure {
                iterations: 1,
                tolerance: 1e-12
            }
        );
    }

    #[test]
    fn regular_graph_stays_uniform() {
        // Every node of a 4-cycle has degree 2, so the uniform start is
        // already the principal direction: the first round only rescales it
        // and the second observes no change.
        let g = InteractionGraph::from_pairs([("A", "B"), ("B", "C"), ("C", "D"), ("D", "A")]);
        let result = eigenvector_with_stats(&g, 1000, 1e-10).expect("cycle converges");
        for score in result.scores.values() {
            assert!((score - 0.5).abs() < 1e-9);
        }
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn edgeless_graph_is_uniform() {
        let g = InteractionGraph::from_nodes_and_pairs(["A", "B", "C", "D"], std::iter::empty());
        let scores = eigenvector_centrality(&g, 10, 1e-6).expect("identity converges");
        for score in scores.values() {
            assert!((score - 0.5).abs() < 1e-12);
        }
    }
}
