//! Seeded Gaussian blob datasets for benchmarks.

use wishart_core::DenseVectors;
use wishart_test_support::datasets::gaussian_blobs;

use crate::error::BenchSetupError;

/// Distance between neighbouring blob centers along every axis.
const BLOB_SPACING: f32 = 20.0;

/// Shape of a synthetic benchmark dataset.
#[derive(Clone, Debug)]
pub struct SyntheticConfig {
    /// Number of blobs.
    pub blobs: usize,
    /// Points sampled around each blob center.
    pub per_blob: usize,
    /// Vector dimensionality.
    pub dimensions: usize,
    /// Seed for the generator.
    pub seed: u64,
}

impl SyntheticConfig {
    /// Total number of points the configuration produces.
    #[must_use]
    pub const fn point_count(&self) -> usize {
        self.blobs.saturating_mul(self.per_blob)
    }
}

/// Generates unit-variance blobs whose centers sit on the diagonal,
/// `BLOB_SPACING` apart.
///
/// # Errors
/// Returns [`BenchSetupError::ZeroValue`] when any count is zero.
pub fn blob_source(config: &SyntheticConfig) -> Result<DenseVectors, BenchSetupError> {
    for (value, context) in [
        (config.blobs, "blobs"),
        (config.per_blob, "per_blob"),
        (config.dimensions, "dimensions"),
    ] {
        if value == 0 {
            return Err(BenchSetupError::ZeroValue { context });
        }
    }

    let centers = diagonal_centers(config.blobs, config.dimensions);
    let rows = gaussian_blobs(&centers, config.per_blob, 1.0, config.seed);
    let name = format!("blobs-{}x{}", config.blobs, config.per_blob);
    Ok(DenseVectors::try_from_rows(name, rows)?)
}

#[expect(
    clippy::float_arithmetic,
    reason = "blob centers are spaced by repeated addition"
)]
fn diagonal_centers(blobs: usize, dimensions: usize) -> Vec<Vec<f32>> {
    std::iter::successors(Some(0.0_f32), |offset| Some(offset + BLOB_SPACING))
        .take(blobs)
        .map(|offset| vec![offset; dimensions])
        .collect()
}
