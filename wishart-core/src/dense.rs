//! In-memory dense point sets.
//!
//! [`DenseVectors`] stores points row-major in a single contiguous buffer and
//! validates the input shape once, at construction, so the clustering run can
//! rely on a consistent dimensionality.

use std::sync::Arc;

use crate::{datasource::DataSource, error::DataSourceError};

/// Row-major dense matrix of `f32` points implementing [`DataSource`].
///
/// # Examples
/// ```
/// use wishart_core::{DataSource, DenseVectors};
///
/// let points = DenseVectors::try_from_rows("demo", vec![vec![0.0, 0.0], vec![3.0, 4.0]])?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.dimension(), 2);
/// assert_eq!(points.distance(0, 1)?, 5.0);
/// # Ok::<(), wishart_core::DataSourceError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DenseVectors {
    name: Arc<str>,
    dimension: usize,
    data: Vec<f32>,
}

impl DenseVectors {
    /// Builds a point set from individual rows.
    ///
    /// # Errors
    /// Returns [`DataSourceError::EmptyData`] when `rows` is empty,
    /// [`DataSourceError::ZeroDimension`] when the first row is empty,
    /// [`DataSourceError::DimensionMismatch`] when a later row has a different
    /// length, and [`DataSourceError::NonFinite`] when any coordinate is NaN or
    /// infinite.
    pub fn try_from_rows(
        name: impl Into<Arc<str>>,
        rows: Vec<Vec<f32>>,
    ) -> Result<Self, DataSourceError> {
        let dimension = rows.first().ok_or(DataSourceError::EmptyData)?.len();
        if dimension == 0 {
            return Err(DataSourceError::ZeroDimension);
        }

        let mut data = Vec::with_capacity(rows.len() * dimension);
        for (index, row) in rows.into_iter().enumerate() {
            if row.len() != dimension {
                return Err(DataSourceError::DimensionMismatch {
                    index,
                    expected: dimension,
                    found: row.len(),
                });
            }
            data.extend(row);
        }

        Self::try_from_flat(name, dimension, data)
    }

    /// Builds a point set from a flat row-major buffer.
    ///
    /// # Errors
    /// Returns [`DataSourceError::ZeroDimension`] when `dimension` is zero,
    /// [`DataSourceError::EmptyData`] when `data` is empty,
    /// [`DataSourceError::DimensionMismatch`] when `data.len()` is not a
    /// multiple of `dimension`, and [`DataSourceError::NonFinite`] for NaN or
    /// infinite coordinates.
    pub fn try_from_flat(
        name: impl Into<Arc<str>>,
        dimension: usize,
        data: Vec<f32>,
    ) -> Result<Self, DataSourceError> {
        if dimension == 0 {
            return Err(DataSourceError::ZeroDimension);
        }
        if data.is_empty() {
            return Err(DataSourceError::EmptyData);
        }
        let remainder = data.len() % dimension;
        if remainder != 0 {
            return Err(DataSourceError::DimensionMismatch {
                index: data.len() / dimension,
                expected: dimension,
                found: remainder,
            });
        }
        if let Some(position) = data.iter().position(|value| !value.is_finite()) {
            return Err(DataSourceError::NonFinite {
                index: position / dimension,
                component: position % dimension,
            });
        }

        Ok(Self {
            name: name.into(),
            dimension,
            data,
        })
    }

    /// Builds a new point set holding only the rows listed in `indices`, in
    /// the given order.
    ///
    /// # Errors
    /// Returns [`DataSourceError::OutOfBounds`] when an index is invalid and
    /// [`DataSourceError::EmptyData`] when `indices` is empty.
    pub fn select<D: DataSource + ?Sized>(
        source: &D,
        indices: &[usize],
    ) -> Result<Self, DataSourceError> {
        let mut data = Vec::with_capacity(indices.len() * source.dimension());
        for &index in indices {
            data.extend_from_slice(source.point(index)?);
        }
        Self::try_from_flat(source.name(), source.dimension(), data)
    }

    /// Returns an iterator over the stored rows.
    pub fn rows(&self) -> impl Iterator<Item = &[f32]> {
        self.data.chunks_exact(self.dimension)
    }
}

impl DataSource for DenseVectors {
    fn len(&self) -> usize {
        self.data.len() / self.dimension
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn point(&self, index: usize) -> Result<&[f32], DataSourceError> {
        let start = index
            .checked_mul(self.dimension)
            .ok_or(DataSourceError::OutOfBounds { index })?;
        let end = start
            .checked_add(self.dimension)
            .ok_or(DataSourceError::OutOfBounds { index })?;
        self.data
            .get(start..end)
            .ok_or(DataSourceError::OutOfBounds { index })
    }
}
