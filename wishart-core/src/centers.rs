//! Representative points of finished clusters.

use crate::{
    datasource::DataSource,
    error::DataSourceError,
    neighbours::{BruteForceOracle, NeighbourOracle},
    result::ClusterId,
};

/// The most central member of a cluster.
///
/// The center is the member whose `k`-th nearest neighbour *within the
/// cluster* is closest, i.e. the member sitting in the densest part of it.
#[derive(Clone, Debug, PartialEq)]
pub struct ClusterCenter {
    /// Cluster the center belongs to.
    pub cluster: ClusterId,
    /// Index of the center within the original [`DataSource`].
    pub index: usize,
    /// Position of the center.
    pub position: Vec<f32>,
}

/// Returns the local index of the densest point of `members`.
///
/// `k` is clamped to `members.len() - 1`; a single point is its own center.
/// Ties resolve towards the lower index.
pub(crate) fn densest_point<D>(
    members: &D,
    k: usize,
    oracle: BruteForceOracle,
) -> Result<usize, DataSourceError>
where
    D: DataSource + Sync + ?Sized,
{
    let k = k.min(members.len().saturating_sub(1));
    if k == 0 {
        return Ok(0);
    }
    let table = oracle.neighbours(members, k)?;
    Ok(table
        .trigger_distances()
        .iter()
        .enumerate()
        .min_by(|(_, left), (_, right)| left.total_cmp(*right))
        .map_or(0, |(index, _)| index))
}
