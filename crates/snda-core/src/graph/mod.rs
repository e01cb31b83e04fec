//! Interaction graph module.
//!
//! # Overview
//!
//! This module turns a validated edge stream into an immutable undirected
//! simple graph and summarizes it. The graph feeds every centrality metric
//! and every weekly subgraph in the engine.
//!
//! ## Pipeline
//!
//! ```text
//! &[Edge]  (actor, actor, timestamp)
//!        ↓  build::InteractionGraph::build()
//! InteractionGraph (deduplicated pairs, node insertion order)
//!        ↓  stats::GraphSummary::from_graph()
//! GraphSummary (node/edge totals, density, components, …)
//! ```
//!
//! ## Typical Usage
//!
//! ```rust
//! use snda_core::edge::Edge;
//! use snda_core::graph::{GraphSummary, InteractionGraph};
//!
//! let edges = vec![
//!     Edge::from_unix("alice", "bob", 1_700_000_000)?,
//!     Edge::from_unix("bob", "carol", 1_700_000_100)?,
//! ];
//! let graph = InteractionGraph::build(&edges);
//! let summary = GraphSummary::from_graph(&graph);
//! assert_eq!((summary.node_count, summary.edge_count), (3, 2));
//! # Ok::<(), snda_core::CoreError>(())
//! ```

pub mod build;
pub mod stats;

// Re-export primary types at module level for convenience.
pub use build::InteractionGraph;
pub use stats::GraphSummary;
