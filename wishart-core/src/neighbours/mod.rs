//! Nearest-neighbour queries consumed by the clustering scan.
//!
//! The scan only needs, for every point, the indices of its `k` nearest
//! neighbours (the point itself excluded) and the distance to the last of
//! them, its *trigger distance*. [`NeighbourOracle`] is the seam where a
//! spatial index plugs in; [`BruteForceOracle`] is the exact reference
//! implementation shipped with the crate.

mod brute_force;
mod table;

use std::cmp::Ordering;

use crate::{datasource::DataSource, error::DataSourceError};

pub use self::{brute_force::BruteForceOracle, table::NeighbourTable};

/// Neighbour discovered during a query, including its distance from the
/// query point.
///
/// Neighbours order by distance first (using [`f32::total_cmp`]) and by index
/// second, so ties resolve towards the lower index.
///
/// # Examples
/// ```
/// use wishart_core::Neighbour;
///
/// let near = Neighbour { id: 7, distance: 0.5 };
/// let tie = Neighbour { id: 3, distance: 0.5 };
/// assert!(tie < near);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Neighbour {
    /// Index of the neighbour within the [`crate::DataSource`].
    pub id: usize,
    /// Distance between the query point and [`Neighbour::id`].
    pub distance: f32,
}

impl Eq for Neighbour {}

impl Ord for Neighbour {
    fn cmp(&self, other: &Self) -> Ordering {
        self.distance
            .total_cmp(&other.distance)
            .then(self.id.cmp(&other.id))
    }
}

impl PartialOrd for Neighbour {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Capability answering k-nearest-neighbour queries for every point of a
/// [`DataSource`].
///
/// Implementations must return exactly `k` neighbours per point, exclude the
/// query point itself, list neighbours nearest first, and report the distance
/// to the `k`-th neighbour as the trigger distance.
pub trait NeighbourOracle {
    /// Queries the `k` nearest neighbours of every point in `source`.
    ///
    /// # Errors
    /// Returns any [`DataSourceError`] raised while reading the source, and
    /// [`DataSourceError::NeighbourQuery`] when `k` is zero or not below the
    /// number of points.
    fn neighbours<D>(&self, source: &D, k: usize) -> Result<NeighbourTable, DataSourceError>
    where
        D: DataSource + Sync + ?Sized;
}
