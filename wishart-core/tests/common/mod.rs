#![allow(dead_code, reason = "each integration test binary uses a subset")]

use wishart_core::{DataSource, DataSourceError, DenseVectors};
use wishart_test_support::datasets::{gaussian_blobs, uniform_cloud};

/// Points per blob in [`two_blobs`].
pub const BLOB_SIZE: usize = 50;

/// Fifty points around `(0, 0)` followed by fifty around `(20, 20)`.
#[must_use]
pub fn two_blobs(seed: u64) -> DenseVectors {
    let rows = gaussian_blobs(&[vec![0.0, 0.0], vec![20.0, 20.0]], BLOB_SIZE, 1.0, seed);
    DenseVectors::try_from_rows("blobs", rows).expect("generated rows are valid")
}

/// 150 points spread uniformly through a three-dimensional cube.
#[must_use]
pub fn cube_cloud(seed: u64) -> DenseVectors {
    DenseVectors::try_from_rows("cloud", uniform_cloud(150, 3, 10.0, seed))
        .expect("generated rows are valid")
}

#[must_use]
pub fn line(values: &[f32]) -> DenseVectors {
    DenseVectors::try_from_flat("line", 1, values.to_vec()).expect("values are valid")
}

/// Source with no points, which [`DenseVectors`] refuses to represent.
pub struct Empty;

impl DataSource for Empty {
    fn len(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "empty"
    }

    fn dimension(&self) -> usize {
        2
    }

    fn point(&self, index: usize) -> Result<&[f32], DataSourceError> {
        Err(DataSourceError::OutOfBounds { index })
    }
}

/// Source whose points after `readable` cannot be read.
pub struct Truncated {
    pub inner: DenseVectors,
    pub readable: usize,
}

impl DataSource for Truncated {
    fn len(&self) -> usize {
        self.inner.len()
    }

    fn name(&self) -> &str {
        "truncated"
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn point(&self, index: usize) -> Result<&[f32], DataSourceError> {
        if index >= self.readable {
            return Err(DataSourceError::OutOfBounds { index });
        }
        self.inner.point(index)
    }
}

/// Source whose rows disagree with the dimension it reports.
pub struct Ragged {
    pub rows: Vec<Vec<f32>>,
}

impl DataSource for Ragged {
    fn len(&self) -> usize {
        self.rows.len()
    }

    fn name(&self) -> &str {
        "ragged"
    }

    fn dimension(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    fn point(&self, index: usize) -> Result<&[f32], DataSourceError> {
        self.rows
            .get(index)
            .map(Vec::as_slice)
            .ok_or(DataSourceError::OutOfBounds { index })
    }
}
