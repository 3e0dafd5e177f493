//! Exact k-nearest-neighbour queries by exhaustive distance evaluation.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::instrument;

use crate::{
    datasource::DataSource,
    error::DataSourceError,
    neighbours::{Neighbour, NeighbourOracle, NeighbourTable},
};

/// Exact oracle that compares every query point against every other point.
///
/// Queries are independent per point; with the `parallel` feature enabled
/// [`BruteForceOracle::parallel`] spreads them across the rayon pool. Results
/// are identical in both modes because each row is ordered by
/// ([`Neighbour`]'s) total order before truncation.
///
/// # Examples
/// ```
/// use wishart_core::{BruteForceOracle, DenseVectors, NeighbourOracle};
///
/// let points = DenseVectors::try_from_flat("line", 1, vec![0.0, 1.0, 3.0, 7.0])?;
/// let table = BruteForceOracle::sequential().neighbours(&points, 2)?;
/// assert_eq!(table.neighbours_of(0), &[1, 2]);
/// assert_eq!(table.trigger_distance(0), 3.0);
/// # Ok::<(), wishart_core::DataSourceError>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BruteForceOracle {
    parallel: bool,
}

impl BruteForceOracle {
    /// Creates an oracle that answers queries on the calling thread.
    #[must_use]
    pub const fn sequential() -> Self {
        Self { parallel: false }
    }

    /// Creates an oracle that answers queries on the rayon thread pool.
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    #[must_use]
    pub const fn parallel() -> Self {
        Self { parallel: true }
    }

    /// Returns whether queries run on the rayon pool.
    #[must_use]
    pub const fn is_parallel(&self) -> bool {
        self.parallel
    }
}

impl NeighbourOracle for BruteForceOracle {
    #[instrument(
        name = "core.neighbours",
        err,
        skip(self, source),
        fields(items = source.len(), k = k, parallel = self.parallel),
    )]
    fn neighbours<D>(&self, source: &D, k: usize) -> Result<NeighbourTable, DataSourceError>
    where
        D: DataSource + Sync + ?Sized,
    {
        let items = source.len();
        if k == 0 || k >= items {
            return Err(DataSourceError::NeighbourQuery { items, k });
        }
        let rows = if self.parallel {
            query_all_parallel(source, k, items)?
        } else {
            (0..items)
                .map(|point| nearest_others(source, point, k))
                .collect::<Result<Vec<_>, _>>()?
        };

        // `items > k >= 1`, so every row holds `k` entries.
        NeighbourTable::from_rows(k, rows).ok_or(DataSourceError::NeighbourQuery { items, k })
    }
}

#[cfg(feature = "parallel")]
fn query_all_parallel<D>(
    source: &D,
    k: usize,
    items: usize,
) -> Result<Vec<Vec<Neighbour>>, DataSourceError>
where
    D: DataSource + Sync + ?Sized,
{
    (0..items)
        .into_par_iter()
        .map(|point| nearest_others(source, point, k))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn query_all_parallel<D>(
    source: &D,
    k: usize,
    items: usize,
) -> Result<Vec<Vec<Neighbour>>, DataSourceError>
where
    D: DataSource + Sync + ?Sized,
{
    (0..items)
        .map(|point| nearest_others(source, point, k))
        .collect()
}

/// Returns the `k` nearest points to `query`, excluding `query` itself,
/// nearest first.
fn nearest_others<D>(source: &D, query: usize, k: usize) -> Result<Vec<Neighbour>, DataSourceError>
where
    D: DataSource + ?Sized,
{
    if k == 0 {
        return Ok(Vec::new());
    }
    let candidates: Vec<usize> = (0..source.len()).filter(|&other| other != query).collect();
    let distances = source.batch_distances(query, &candidates)?;
    let mut neighbours: Vec<Neighbour> = candidates
        .into_iter()
        .zip(distances)
        .map(|(id, distance)| Neighbour { id, distance })
        .collect();

    if k < neighbours.len() {
        neighbours.select_nth_unstable(k - 1);
        neighbours.truncate(k);
    }
    neighbours.sort_unstable();
    Ok(neighbours)
}
