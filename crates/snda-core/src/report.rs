//! Dataset-level analysis: totals plus one top-K ranking per centrality.
//!
//! # Overview
//!
//! [`DatasetReport::analyze`] runs the global path for one dataset:
//!
//! ```text
//! &[Edge] → InteractionGraph → {degree, closeness, betweenness, eigenvector}
//!         → top_k per metric → DatasetReport
//! ```
//!
//! The four metrics read the same immutable graph and run concurrently on the
//! rayon pool.
//!
//! ## Eigenvector degradation
//!
//! Eigenvector centrality is the only metric that can fail. The configured
//! [`RetryPolicy`](crate::config::RetryPolicy) decides how many more attempts
//! (with a larger budget and looser tolerance) are made; if the last attempt
//! still fails, the ranking is replaced by [`MetricOutcome::NotComputable`]
//! and the rest of the report is unaffected.

use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::config::{AnalysisConfig, EigenvectorConfig};
use crate::edge::Edge;
use crate::error::CoreError;
use crate::graph::{GraphSummary, InteractionGraph};
use crate::metrics::{
    CentralityKind, ScoreMap, betweenness::betweenness_centrality,
    closeness::closeness_centrality, degree::degree_centrality,
    eigenvector::eigenvector_centrality,
};
use crate::rank::{RankedList, top_k};

/// Notice shown in place of an eigenvector ranking that could not be computed.
pub const EIGENVECTOR_NOTICE: &str =
    "Could not compute eigenvector centrality for this network.";

/// A ranking, or the reason it is missing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MetricOutcome {
    Ranked { entries: RankedList },
    /// `code` is the [`ErrorCode`](crate::ErrorCode) identifier of the failure.
    NotComputable {
        notice: String,
        code: String,
        reason: String,
    },
}

impl MetricOutcome {
    /// The ranking, if one was produced.
    #[must_use]
    pub fn entries(&self) -> Option<&RankedList> {
        match self {
            Self::Ranked { entries } => Some(entries),
            Self::NotComputable { .. } => None,
        }
    }
}

/// One metric's section of a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSection {
    pub kind: CentralityKind,
    #[serde(flatten)]
    pub outcome: MetricOutcome,
}

/// Global analysis of one dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetReport {
    pub name: String,
    pub summary: GraphSummary,
    pub metrics: Vec<MetricSection>,
}

impl DatasetReport {
    /// Build the graph for `edges` and analyze it.
    #[must_use]
    #[instrument(skip(edges, config), fields(edge_count = edges.len()))]
    pub fn analyze(name: &str, edges: &[Edge], config: &AnalysisConfig) -> Self {
        let graph = InteractionGraph::build(edges);
        Self::from_graph(name, &graph, config)
    }

    /// Analyze an already-built graph.
    #[must_use]
    pub fn from_graph(name: &str, graph: &InteractionGraph, config: &AnalysisConfig) -> Self {
        let summary = GraphSummary::from_graph(graph);
        let k = config.top_k;

        let ((degree, closeness), (betweenness, eigenvector)) = rayon::join(
            || {
                rayon::join(
                    || degree_centrality(graph),
                    || closeness_centrality(graph),
                )
            },
            || {
                rayon::join(
                    || betweenness_centrality(graph),
                    || eigenvector_with_policy(graph, &config.eigenvector),
                )
            },
        );

        let ranked = |scores: &ScoreMap| MetricOutcome::Ranked {
            entries: top_k(scores, k),
        };

        let eigen_outcome = match eigenvector {
            Ok(scores) => ranked(&scores),
            Err(err) => MetricOutcome::NotComputable {
                notice: EIGENVECTOR_NOTICE.to_string(),
                code: err.code().to_string(),
                reason: err.to_string(),
            },
        };

        info!(
            dataset = name,
            nodes = summary.node_count,
            edges = summary.edge_count,
            "dataset analyzed"
        );

        Self {
            name: name.to_string(),
            summary,
            metrics: vec![
                MetricSection {
                    kind: CentralityKind::Degree,
                    outcome: ranked(&degree),
                },
                MetricSection {
                    kind: CentralityKind::Closeness,
                    outcome: ranked(&closeness),
                },
                MetricSection {
                    kind: CentralityKind::Betweenness,
                    outcome: ranked(&betweenness),
                },
                MetricSection {
                    kind: CentralityKind::Eigenvector,
                    outcome: eigen_outcome,
                },
            ],
        }
    }

    /// The section for `kind`.
    #[must_use]
    pub fn metric(&self, kind: CentralityKind) -> Option<&MetricOutcome> {
        self.metrics
            .iter()
            .find(|section| section.kind == kind)
            .map(|section| &section.outcome)
    }
}

/// Run eigenvector centrality under the configured retry policy.
///
/// # Errors
///
/// Returns the last [`CoreError::ConvergenceFailure`] once every permitted
/// attempt has failed.
pub fn eigenvector_with_policy(
    graph: &InteractionGraph,
    config: &EigenvectorConfig,
) -> Result<ScoreMap, CoreError> {
    let mut attempt = 0;
    loop {
        let (max_iter, tolerance) = config.retry.attempt(config, attempt);
        match eigenvector_centrality(graph, max_iter, tolerance) {
            Ok(scores) => return Ok(scores),
            Err(err) if attempt < config.retry.max_retries => {
                attempt += 1;
                warn!(%err, attempt, "retrying eigenvector centrality");
            }
            Err(err) => return Err(err),
        }
    }
}
