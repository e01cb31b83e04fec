//! Weekly segmentation of an interaction stream.
//!
//! # Overview
//!
//! [`segment_by_week`] groups edges by the ISO calendar week (Monday through
//! Sunday, UTC) that contains their timestamp. Only weeks with at least one
//! edge appear; quiet weeks are gaps between buckets, not empty buckets.
//!
//! The buckets partition the input: every edge lands in exactly one bucket,
//! and within a bucket edges keep their input order.
//!
//! [`weekly_graphs`] builds one [`InteractionGraph`] per bucket. Builds are
//! independent, so they run on the rayon pool.
//!
//! # Layout
//!
//! Drawing coordinates are not computed here. A presentation layer supplies
//! its own [`Layout`] and applies it to each [`WeeklyGraph`].

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use indexmap::IndexMap;
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::edge::Edge;
use crate::graph::InteractionGraph;

// ---------------------------------------------------------------------------
// WeekBucket
// ---------------------------------------------------------------------------

/// The edges that fall within one ISO week.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBucket {
    /// ISO week-numbering year (may differ from the calendar year around
    /// New Year).
    pub iso_year: i32,
    /// ISO week number, 1–53.
    pub iso_week: u32,
    /// Monday of the week.
    pub start: NaiveDate,
    /// Edges whose timestamp falls in this week, in input order.
    pub edges: Vec<Edge>,
}

impl WeekBucket {
    /// Sunday of the week.
    #[must_use]
    pub fn end(&self) -> NaiveDate {
        NaiveDate::from_isoywd_opt(self.iso_year, self.iso_week, Weekday::Sun)
            .unwrap_or(self.start)
    }

    /// Period label, `YYYY-MM-DD/YYYY-MM-DD` (Monday/Sunday).
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}/{}", self.start, self.end())
    }

    /// ISO label, `YYYY-Www`.
    #[must_use]
    pub fn iso_label(&self) -> String {
        format!("{}-W{:02}", self.iso_year, self.iso_week)
    }
}

/// Split `edges` into ISO-week buckets ordered by week start.
#[must_use]
#[instrument(skip(edges), fields(edge_count = edges.len()))]
pub fn segment_by_week(edges: &[Edge]) -> Vec<WeekBucket> {
    let mut weeks: BTreeMap<(i32, u32), Vec<Edge>> = BTreeMap::new();

    for edge in edges {
        let iso = edge.timestamp.date_naive().iso_week();
        weeks
            .entry((iso.year(), iso.week()))
            .or_default()
            .push(edge.clone());
    }

    let buckets: Vec<WeekBucket> = weeks
        .into_iter()
        .map(|((iso_year, iso_week), edges)| {
            let start = NaiveDate::from_isoywd_opt(iso_year, iso_week, Weekday::Mon)
                .or_else(|| edges.first().map(|e| e.timestamp.date_naive()))
                .unwrap_or_default();
            WeekBucket {
                iso_year,
                iso_week,
                start,
                edges,
            }
        })
        .collect();

    debug!(weeks = buckets.len(), "edge stream segmented by week");
    buckets
}

// ---------------------------------------------------------------------------
// WeeklyGraph
// ---------------------------------------------------------------------------

/// The interaction graph of one observed week.
#[derive(Debug, Clone)]
pub struct WeeklyGraph {
    /// Period label, `YYYY-MM-DD/YYYY-MM-DD`.
    pub label: String,
    /// ISO week label, `YYYY-Www`.
    pub iso_label: String,
    /// Monday of the week.
    pub start: NaiveDate,
    /// Number of raw interactions in the week (before deduplication).
    pub interactions: usize,
    pub graph: InteractionGraph,
}

impl WeeklyGraph {
    /// Build the weekly graph for one bucket.
    #[must_use]
    pub fn from_bucket(bucket: &WeekBucket) -> Self {
        Self {
            label: bucket.label(),
            iso_label: bucket.iso_label(),
            start: bucket.start,
            interactions: bucket.edges.len(),
            graph: InteractionGraph::build(&bucket.edges),
        }
    }

    /// Compute drawing positions with a caller-supplied layout.
    #[must_use]
    pub fn layout_with<L: Layout + ?Sized>(&self, layout: &L) -> Positions {
        layout.layout(&self.graph)
    }
}

/// Segment `edges` by week and build one graph per observed week.
#[must_use]
#[instrument(skip(edges), fields(edge_count = edges.len()))]
pub fn weekly_graphs(edges: &[Edge]) -> Vec<WeeklyGraph> {
    segment_by_week(edges)
        .par_iter()
        .map(WeeklyGraph::from_bucket)
        .collect()
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Actor → 2-D drawing coordinates.
pub type Positions = IndexMap<String, (f64, f64)>;

/// A spatial layout algorithm, supplied by whoever draws the graphs.
pub trait Layout {
    /// Assign a position to every node of `graph`.
    fn layout(&self, graph: &InteractionGraph) -> Positions;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
