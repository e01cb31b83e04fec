//! Centrality metrics for the interaction graph.
//!
//! # Overview
//!
//! Each metric answers a different question about actor importance:
//!
//! - **Degree centrality** (`degree`): What fraction of the community does
//!   this actor interact with directly?
//! - **Closeness centrality** (`closeness`): How few hops separate this actor
//!   from everyone they can reach?
//! - **Betweenness centrality** (`betweenness`): Which actors bridge otherwise
//!   distant parts of the network?
//! - **Eigenvector centrality** (`eigenvector`): Which actors are connected
//!   to other well-connected actors?
//!
//! # Usage
//!
//! All metrics take an [`InteractionGraph`] reference and return a
//! [`ScoreMap`] keyed by actor identifier, iterating in node insertion order.
//!
//! ```rust
//! use snda_core::graph::InteractionGraph;
//! use snda_core::metrics::{betweenness, closeness, degree, eigenvector};
//!
//! let g = InteractionGraph::from_pairs([("a", "b"), ("b", "c"), ("c", "a"), ("c", "d")]);
//!
//! let dc = degree::degree_centrality(&g);
//! let cc = closeness::closeness_centrality(&g);
//! let bc = betweenness::betweenness_centrality(&g);
//! let ev = eigenvector::eigenvector_centrality(&g, 1000, 1e-6)?;
//! assert!(bc["c"] > bc["a"]);
//! assert!((dc["c"] - 1.0).abs() < 1e-12);
//! # let _ = (cc, ev);
//! # Ok::<(), snda_core::CoreError>(())
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::graph::InteractionGraph;

pub mod betweenness;
pub mod closeness;
pub mod degree;
pub mod eigenvector;

/// Actor identifier → centrality score, in node insertion order.
pub type ScoreMap = IndexMap<String, f64>;

/// The four centrality definitions the engine computes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CentralityKind {
    Degree,
    Closeness,
    Betweenness,
    Eigenvector,
}

impl CentralityKind {
    /// All kinds in report order.
    pub const ALL: [Self; 4] = [
        Self::Degree,
        Self::Closeness,
        Self::Betweenness,
        Self::Eigenvector,
    ];

    /// Column heading used by the presentation layer.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Degree => "Degree Centrality",
            Self::Closeness => "Closeness Centrality",
            Self::Betweenness => "Betweenness Centrality",
            Self::Eigenvector => "Eigenvector Centrality",
        }
    }

    /// Short machine-facing name; matches the serde representation.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Degree => "degree",
            Self::Closeness => "closeness",
            Self::Betweenness => "betweenness",
            Self::Eigenvector => "eigenvector",
        }
    }
}

impl fmt::Display for CentralityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Attach node-indexed scores to actor labels, preserving node order.
pub(crate) fn label_scores(graph: &InteractionGraph, scores: &[f64]) -> ScoreMap {
    graph
        .node_ids()
        .zip(scores.iter().copied())
        .map(|(id, score)| (id.to_string(), score))
        .collect()
}
