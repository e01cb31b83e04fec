use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tunables for one analysis run.
///
/// Every field has a default. An empty (or absent) config file means top 10
/// per metric and eigenvector centrality with 1000 iterations at tolerance
/// `1e-6`, without retries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default)]
    pub eigenvector: EigenvectorConfig,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
            eigenvector: EigenvectorConfig::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenvectorConfig {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default)]
    pub retry: RetryPolicy,
}

impl Default for EigenvectorConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            tolerance: default_tolerance(),
            retry: RetryPolicy::default(),
        }
    }
}

/// What to do when power iteration fails to converge.
///
/// Each retry multiplies the iteration budget by `iteration_multiplier` and
/// the tolerance by `tolerance_multiplier`. With `max_retries = 0` the first
/// failure is final and the metric is reported as not computable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryPolicy {
    #[serde(default)]
    pub max_retries: u32,
    #[serde(default = "default_iteration_multiplier")]
    pub iteration_multiplier: usize,
    #[serde(default = "default_tolerance_multiplier")]
    pub tolerance_multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            iteration_multiplier: default_iteration_multiplier(),
            tolerance_multiplier: default_tolerance_multiplier(),
        }
    }
}

impl RetryPolicy {
    /// Budget and tolerance for attempt `attempt` (0 = first try).
    #[must_use]
    pub fn attempt(&self, base: &EigenvectorConfig, attempt: u32) -> (usize, f64) {
        let mut iterations = base.max_iterations;
        let mut tolerance = base.tolerance;
        for _ in 0..attempt {
            iterations = iterations.saturating_mul(self.iteration_multiplier.max(1));
            tolerance *= self.tolerance_multiplier.max(1.0);
        }
        (iterations, tolerance)
    }
}

const fn default_top_k() -> usize {
    10
}

const fn default_max_iterations() -> usize {
    1000
}

const fn default_tolerance() -> f64 {
    1e-6
}

const fn default_iteration_multiplier() -> usize {
    2
}

const fn default_tolerance_multiplier() -> f64 {
    10.0
}

/// Load an [`AnalysisConfig`] from a TOML file.
///
/// A missing file is not an error: defaults are returned.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AnalysisConfig> {
    if !path.exists() {
        return Ok(AnalysisConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<AnalysisConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}
