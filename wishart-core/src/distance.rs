//! Distance primitives used by the neighbour oracle.
//!
//! Accumulation happens in `f64` so trigger distances stay stable for points
//! with large coordinates; the result is narrowed to `f32` to match the
//! storage type of positions.

use thiserror::Error;

/// Errors emitted while computing distances.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DistanceError {
    /// Either input vector had zero length.
    #[error("vectors must have positive dimension")]
    ZeroLength,
    /// Input vectors had different lengths.
    #[error("dimension mismatch: left={left}, right={right}")]
    DimensionMismatch {
        /// Length of the first argument.
        left: usize,
        /// Length of the second argument.
        right: usize,
    },
}

/// Computes the Euclidean distance between two vectors.
///
/// # Examples
///
/// ```
/// use wishart_core::{DistanceError, euclidean_distance};
///
/// fn main() -> Result<(), DistanceError> {
///     let distance = euclidean_distance(&[1.0, 2.0, 3.0], &[4.0, 6.0, 8.0])?;
///     assert!((distance - 7.071_068).abs() < 1e-6);
///     Ok(())
/// }
/// ```
///
/// # Errors
///
/// - [`DistanceError::ZeroLength`] when any input is empty.
/// - [`DistanceError::DimensionMismatch`] when input lengths differ.
pub fn euclidean_distance(left: &[f32], right: &[f32]) -> Result<f32, DistanceError> {
    if left.is_empty() || right.is_empty() {
        return Err(DistanceError::ZeroLength);
    }
    if left.len() != right.len() {
        return Err(DistanceError::DimensionMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    let sum: f64 = left
        .iter()
        .zip(right)
        .map(|(&l, &r)| {
            let diff = f64::from(l) - f64::from(r);
            diff * diff
        })
        .sum();

    Ok(sum.sqrt() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&[0.0, 0.0], &[3.0, 4.0], 5.0)]
    #[case(&[1.0], &[1.0], 0.0)]
    #[case(&[-1.0, -1.0, -1.0], &[1.0, 1.0, 1.0], 12.0_f32.sqrt())]
    fn computes_expected_distance(#[case] left: &[f32], #[case] right: &[f32], #[case] expected: f32) {
        let distance = euclidean_distance(left, right).expect("distance must succeed");
        assert!((distance - expected).abs() < 1e-6, "got {distance}, expected {expected}");
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err = euclidean_distance(&[0.0, 1.0], &[0.0]).expect_err("lengths differ");
        assert_eq!(err, DistanceError::DimensionMismatch { left: 2, right: 1 });
    }

    #[test]
    fn rejects_empty_vectors() {
        let err = euclidean_distance(&[], &[]).expect_err("empty vectors are invalid");
        assert_eq!(err, DistanceError::ZeroLength);
    }
}
