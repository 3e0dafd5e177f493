//! Benchmark parameter types, rendered as Criterion benchmark ids.

use std::fmt;

/// Parameters for a neighbour-query benchmark run.
#[derive(Clone, Debug)]
pub struct NeighbourBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Whether the query runs on the rayon pool.
    pub parallel: bool,
}

impl fmt::Display for NeighbourBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.parallel { "parallel" } else { "sequential" };
        write!(f, "n={},{mode}", self.point_count)
    }
}

/// Parameters for a full clustering benchmark run.
#[derive(Clone, Debug)]
pub struct ScanBenchParams {
    /// Number of points in the dataset.
    pub point_count: usize,
    /// Neighbours per point.
    pub wishart_neighbors: usize,
}

impl fmt::Display for ScanBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},k={}", self.point_count, self.wishart_neighbors)
    }
}
