//! Timestamped interaction edges.
//!
//! An [`Edge`] is the unit handed over by the ingestion layer: two actor
//! identifiers and the moment they interacted. Orientation carries no
//! meaning; `(a, b)` and `(b, a)` describe the same interaction pair.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// One interaction between two actors at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Edge {
    /// First endpoint as it appeared in the input.
    pub source: String,
    /// Second endpoint as it appeared in the input.
    pub target: String,
    /// Event time (UTC).
    pub timestamp: DateTime<Utc>,
}

impl Edge {
    /// Create an edge from already-parsed parts.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            timestamp,
        }
    }

    /// Create an edge from a Unix epoch timestamp in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::TimestampOutOfRange`] if `seconds` cannot be
    /// represented as a UTC date-time.
    pub fn from_unix(
        source: impl Into<String>,
        target: impl Into<String>,
        seconds: i64,
    ) -> Result<Self, CoreError> {
        let timestamp =
            DateTime::from_timestamp(seconds, 0).ok_or(CoreError::TimestampOutOfRange(seconds))?;
        Ok(Self::new(source, target, timestamp))
    }
}

/// Endpoints in lexicographic order, so that `(a, b)` and `(b, a)` compare
/// equal.
#[must_use]
pub fn canonical_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b { (a, b) } else { (b, a) }
}
