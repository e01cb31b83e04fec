#![forbid(unsafe_code)]
//! snda-core library.
//!
//! Builds undirected interaction graphs from timestamped edge lists, ranks
//! actors by degree, closeness, betweenness and eigenvector centrality, and
//! splits an edge stream into calendar-week subgraphs.
//!
//! # Conventions
//!
//! - **Errors**: [`error::CoreError`] for the recoverable failures of the
//!   engine, `anyhow::Result` at I/O boundaries (config loading).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).
//! - **State**: every operation takes the graph or edge slice it works on as
//!   an argument. Nothing here keeps process-wide state.

pub mod config;
pub mod edge;
pub mod error;
pub mod graph;
pub mod metrics;
pub mod rank;
pub mod report;
pub mod temporal;

pub use edge::Edge;
pub use error::{CoreError, ErrorCode};
pub use graph::{GraphSummary, InteractionGraph};
pub use metrics::{CentralityKind, ScoreMap};
pub use rank::{RankedEntry, RankedList, top_k};
pub use temporal::{WeekBucket, WeeklyGraph, segment_by_week, weekly_graphs};
