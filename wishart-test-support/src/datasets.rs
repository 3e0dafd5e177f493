//! Seeded synthetic point sets for tests and benchmarks.
//!
//! Every generator is deterministic for a given seed and returns plain rows
//! so callers can wrap them in whichever data source they need.

use std::f32::consts::PI;

use rand::{Rng, SeedableRng, rngs::SmallRng};

/// Samples `per_blob` points around each of `centers` with isotropic
/// Gaussian spread `std_dev`. Rows are grouped by blob, in `centers` order.
///
/// # Examples
/// ```
/// use wishart_test_support::datasets::gaussian_blobs;
///
/// let rows = gaussian_blobs(&[vec![0.0, 0.0], vec![20.0, 20.0]], 50, 1.0, 7);
/// assert_eq!(rows.len(), 100);
/// assert!(rows.iter().all(|row| row.len() == 2));
/// assert_eq!(rows, gaussian_blobs(&[vec![0.0, 0.0], vec![20.0, 20.0]], 50, 1.0, 7));
/// ```
#[must_use]
pub fn gaussian_blobs(centers: &[Vec<f32>], per_blob: usize, std_dev: f32, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    centers
        .iter()
        .flat_map(|center| std::iter::repeat_n(center, per_blob))
        .map(|center| {
            center
                .iter()
                .map(|&mean| mean + std_dev * standard_normal(&mut rng))
                .collect()
        })
        .collect()
}

/// Samples `count` points uniformly from the cube `[0, extent)^dimension`.
///
/// # Examples
/// ```
/// use wishart_test_support::datasets::uniform_cloud;
///
/// let rows = uniform_cloud(30, 3, 5.0, 11);
/// assert_eq!(rows.len(), 30);
/// assert!(rows.iter().flatten().all(|&value| (0.0..5.0).contains(&value)));
/// ```
#[must_use]
pub fn uniform_cloud(count: usize, dimension: usize, extent: f32, seed: u64) -> Vec<Vec<f32>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..count)
        .map(|_| (0..dimension).map(|_| rng.gen_range(0.0..extent)).collect())
        .collect()
}

/// Box-Muller transform over two uniform draws.
fn standard_normal(rng: &mut SmallRng) -> f32 {
    let u1 = rng.gen_range(f32::EPSILON..1.0_f32);
    let u2 = rng.gen_range(0.0_f32..1.0_f32);
    (-2.0_f32 * u1.ln()).sqrt() * (2.0_f32 * PI * u2).cos()
}
