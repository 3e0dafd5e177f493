//! Statistical significance of a cluster's trigger-distance range.
//!
//! A cluster whose member trigger distances span a wide range reaches from a
//! dense core out into sparse territory and is treated as a genuine mode of
//! the density. The score is
//!
//! ```text
//! k / N / π^(d/2) · Γ(d/2 + 1) · (min_dist^-d − max_dist^-d)
//! ```
//!
//! where `k` is the neighbour count, `N` the number of points and `d` the
//! dimension.

use std::f64::consts::PI;

use statrs::function::gamma::ln_gamma;

use crate::session::ClusterRecord;

/// Constants of the score that depend only on the run configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct SignificanceModel {
    scale: f64,
    dimension: f64,
}

impl SignificanceModel {
    pub(crate) fn new(k: usize, items: usize, dimension: usize) -> Self {
        let d = dimension as f64;
        let half = d / 2.0;
        // Γ(d/2 + 1) / π^(d/2), evaluated in log space so wide inputs do not
        // overflow before the division.
        let unit_ball = (ln_gamma(half + 1.0) - half * PI.ln()).exp();
        Self {
            scale: k as f64 / items as f64 * unit_ball,
            dimension: d,
        }
    }

    /// Scores a trigger-distance range.
    ///
    /// A range starting at zero (duplicate points) scores `+∞`. A collapsed
    /// range scores `0`.
    pub(crate) fn score(&self, min_dist: f32, max_dist: f32) -> f64 {
        let min = f64::from(min_dist);
        let max = f64::from(max_dist);
        if min <= 0.0 {
            return f64::INFINITY;
        }
        if min >= max {
            return 0.0;
        }
        // min^-d − max^-d = min^-d · (1 − (min/max)^d)
        let spread = min.powf(-self.dimension) * (1.0 - (min / max).powf(self.dimension));
        self.scale * spread
    }

    pub(crate) fn score_record(&self, record: &ClusterRecord) -> f64 {
        self.score(record.min_dist, record.max_dist)
    }
}
