//! Result types for clustering operations.
//!
//! Provides structures to represent clustering results including cluster
//! assignments and validation of cluster identifier constraints.

use std::{collections::BTreeSet, fmt};

use thiserror::Error;

use crate::finalize::compact_labels;

/// Represents the output of a [`crate::Wishart::run`] invocation.
///
/// Label `0` is reserved for noise. Real clusters are numbered `1..=m`
/// without gaps, preserving the relative order in which the scan allocated
/// them.
///
/// # Examples
/// ```
/// use wishart_core::{ClusterId, ClusteringResult};
///
/// let result = ClusteringResult::try_from_assignments(vec![
///     ClusterId::new(1),
///     ClusterId::NOISE,
///     ClusterId::new(2),
/// ])?;
/// assert_eq!(result.assignments().len(), 3);
/// assert_eq!(result.cluster_count(), 2);
/// assert_eq!(result.noise_count(), 1);
/// # Ok::<(), wishart_core::NonContiguousClusterIds>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusteringResult {
    assignments: Vec<ClusterId>,
    cluster_count: usize,
    noise_count: usize,
}

/// Error returned when cluster identifiers are not compact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NonContiguousClusterIds {
    /// The non-noise identifiers skip values or do not start at `1`.
    #[error("cluster identifiers must be contiguous from 1 without gaps")]
    Gap,
    /// The assignments require identifiers beyond the host pointer width.
    #[error("cluster identifiers exceed or reach the host pointer-width limit")]
    Overflow,
}

impl ClusteringResult {
    /// Builds a result from arbitrary labels, renumbering them with the
    /// finalizer first.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::{ClusterId, ClusteringResult};
    ///
    /// let result = ClusteringResult::from_raw_labels(&[
    ///     ClusterId::new(7),
    ///     ClusterId::new(3),
    ///     ClusterId::NOISE,
    /// ]);
    /// let ids: Vec<u64> = result.assignments().iter().map(|id| id.get()).collect();
    /// assert_eq!(ids, vec![2, 1, 0]);
    /// ```
    #[must_use]
    pub fn from_raw_labels(labels: &[ClusterId]) -> Self {
        let assignments = compact_labels(labels);
        let noise_count = assignments.iter().filter(|id| id.is_noise()).count();
        let cluster_count = assignments
            .iter()
            .map(|id| id.get())
            .max()
            .map_or(0, |max| usize::try_from(max).unwrap_or(usize::MAX));
        Self {
            assignments,
            cluster_count,
            noise_count,
        }
    }

    /// Attempts to build a result from labels that are already compact.
    ///
    /// An empty `assignments` vector is accepted and yields
    /// `cluster_count == 0`.
    ///
    /// # Errors
    /// Returns [`NonContiguousClusterIds::Gap`] when the non-noise identifiers
    /// are not exactly `1..=m`, and [`NonContiguousClusterIds::Overflow`] when
    /// identifiers exceed the host pointer width.
    pub fn try_from_assignments(
        assignments: Vec<ClusterId>,
    ) -> Result<Self, NonContiguousClusterIds> {
        let mut seen = BTreeSet::new();
        let mut noise_count = 0usize;
        for id in &assignments {
            if id.is_noise() {
                noise_count += 1;
                continue;
            }
            let value =
                usize::try_from(id.get()).map_err(|_| NonContiguousClusterIds::Overflow)?;
            if value == usize::MAX {
                return Err(NonContiguousClusterIds::Overflow);
            }
            seen.insert(value);
        }

        let cluster_count = seen.len();
        if seen.last().is_some_and(|&max| max != cluster_count) {
            return Err(NonContiguousClusterIds::Gap);
        }

        Ok(Self {
            assignments,
            cluster_count,
            noise_count,
        })
    }

    /// Returns the assignments in input order.
    #[must_use]
    pub fn assignments(&self) -> &[ClusterId] {
        &self.assignments
    }

    /// Counts the real (non-noise) clusters.
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.cluster_count
    }

    /// Counts the points labelled as noise.
    #[must_use]
    pub fn noise_count(&self) -> usize {
        self.noise_count
    }

    /// Returns whether any point was labelled as noise.
    #[must_use]
    pub fn has_noise(&self) -> bool {
        self.noise_count > 0
    }

    /// Iterates over the real cluster identifiers in ascending order.
    pub fn cluster_ids(&self) -> impl Iterator<Item = ClusterId> + use<> {
        (1..=self.cluster_count as u64).map(ClusterId::new)
    }

    /// Returns the indices of the points labelled `cluster`.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::{ClusterId, ClusteringResult};
    ///
    /// let result = ClusteringResult::from_raw_labels(&[
    ///     ClusterId::new(1),
    ///     ClusterId::NOISE,
    ///     ClusterId::new(1),
    /// ]);
    /// assert_eq!(result.members(ClusterId::new(1)), vec![0, 2]);
    /// assert_eq!(result.members(ClusterId::NOISE), vec![1]);
    /// ```
    #[must_use]
    pub fn members(&self, cluster: ClusterId) -> Vec<usize> {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(index, &id)| (id == cluster).then_some(index))
            .collect()
    }
}

/// Identifier assigned to a cluster. [`ClusterId::NOISE`] marks points that
/// belong to no significant cluster.
///
/// # Examples
/// ```
/// use wishart_core::ClusterId;
///
/// let id = ClusterId::new(4);
/// assert_eq!(id.get(), 4);
/// assert!(!id.is_noise());
/// assert!(ClusterId::NOISE.is_noise());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(u64);

impl ClusterId {
    /// The reserved noise label.
    pub const NOISE: Self = Self(0);

    /// Creates a new cluster identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn new(id: u64) -> Self { Self(id) }

    /// Returns the underlying numeric identifier.
    #[rustfmt::skip]
    #[must_use]
    pub const fn get(self) -> u64 { self.0 }

    /// Returns whether this is the noise label.
    #[rustfmt::skip]
    #[must_use]
    pub const fn is_noise(self) -> bool { self.0 == 0 }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(index as u64)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
