//! Top-K ranking of centrality scores.
//!
//! Entries are ordered by descending score. Equal scores keep the order in
//! which the [`ScoreMap`] iterates, i.e. node insertion order, so the same
//! input always yields the same list. NaN scores (never produced by the
//! engine) sort after every finite score.

use std::cmp::Ordering;

use serde::Serialize;

use crate::metrics::ScoreMap;

/// One row of a ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    pub node: String,
    pub score: f64,
}

/// Ranked rows, best first.
pub type RankedList = Vec<RankedEntry>;

/// Return the `k` highest-scoring entries of `scores`.
///
/// Returns every entry when the map holds fewer than `k`; an empty map or
/// `k == 0` yields an empty list.
#[must_use]
pub fn top_k(scores: &ScoreMap, k: usize) -> RankedList {
    let mut entries: Vec<(&String, f64)> = scores.iter().map(|(id, &s)| (id, s)).collect();

    // `sort_by` is stable, which is what preserves insertion order on ties.
    entries.sort_by(|a, b| descending(a.1, b.1));

    entries
        .into_iter()
        .take(k)
        .map(|(node, score)| RankedEntry {
            node: node.clone(),
            score,
        })
        .collect()
}

fn descending(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
    }
}
