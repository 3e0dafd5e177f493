//! Data source abstractions for the Wishart core runtime.

use crate::{
    distance::{DistanceError, euclidean_distance},
    error::DataSourceError,
};

/// Abstraction over a fixed set of points in a shared real vector space.
///
/// Implementations expose positions by index; distances default to the
/// Euclidean metric over those positions.
///
/// # Examples
/// ```
/// use wishart_core::{DataSource, DataSourceError};
///
/// struct Line(Vec<[f32; 1]>);
///
/// impl DataSource for Line {
///     fn len(&self) -> usize { self.0.len() }
///     fn name(&self) -> &str { "line" }
///     fn dimension(&self) -> usize { 1 }
///     fn point(&self, index: usize) -> Result<&[f32], DataSourceError> {
///         self.0
///             .get(index)
///             .map(|row| row.as_slice())
///             .ok_or(DataSourceError::OutOfBounds { index })
///     }
/// }
///
/// let src = Line(vec![[1.0], [2.0], [4.0]]);
/// assert_eq!(src.len(), 3);
/// assert_eq!(src.distance(0, 2)?, 3.0);
///
/// let batched = src.batch_distances(0, &[1, 2])?;
/// assert_eq!(batched, [1.0, 3.0]);
/// # Ok::<(), DataSourceError>(())
/// ```
pub trait DataSource {
    /// Returns number of points in the source.
    fn len(&self) -> usize;

    /// Returns whether the source contains no points.
    #[must_use]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a human-readable name.
    fn name(&self) -> &str;

    /// Returns the shared dimensionality of every point.
    fn dimension(&self) -> usize;

    /// Returns the position of the point at `index`.
    ///
    /// # Errors
    /// Returns [`DataSourceError::OutOfBounds`] for invalid indices.
    fn point(&self, index: usize) -> Result<&[f32], DataSourceError>;

    /// Computes the Euclidean distance between two points.
    ///
    /// # Errors
    /// Returns [`DataSourceError::OutOfBounds`] for invalid indices and
    /// [`DataSourceError::DimensionMismatch`] when the rows disagree.
    fn distance(&self, i: usize, j: usize) -> Result<f32, DataSourceError> {
        let left = self.point(i)?;
        let right = self.point(j)?;
        euclidean_distance(left, right).map_err(|error| match error {
            DistanceError::ZeroLength => DataSourceError::ZeroDimension,
            DistanceError::DimensionMismatch { left, right } => {
                DataSourceError::DimensionMismatch {
                    index: j,
                    expected: left,
                    found: right,
                }
            }
        })
    }

    /// Computes the distances from `query` to every entry in `candidates`.
    ///
    /// # Errors
    /// Returns any [`DataSourceError`] surfaced by [`DataSource::distance`].
    fn batch_distances(
        &self,
        query: usize,
        candidates: &[usize],
    ) -> Result<Vec<f32>, DataSourceError> {
        candidates
            .iter()
            .map(|&candidate| self.distance(query, candidate))
            .collect()
    }
}
