//! Classification of the clusters adjacent to a scanned point.

use std::collections::BTreeSet;

use crate::result::ClusterId;

/// Distinct clusters, noise included, among the already-labelled neighbours
/// of the point being scanned.
///
/// The set is ordered so that the lowest id, which survives a merge, is
/// always the first element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum NeighbourClusters {
    /// No neighbour has been labelled yet.
    Unlabelled,
    /// Every labelled neighbour belongs to the same cluster.
    Single(ClusterId),
    /// Labelled neighbours span at least two clusters.
    Multiple(BTreeSet<ClusterId>),
}

impl NeighbourClusters {
    pub(crate) fn classify(labels: impl IntoIterator<Item = ClusterId>) -> Self {
        let ids: BTreeSet<ClusterId> = labels.into_iter().collect();
        let mut iter = ids.iter();
        match (iter.next(), iter.next()) {
            (None, _) => Self::Unlabelled,
            (Some(&only), None) => Self::Single(only),
            (Some(_), Some(_)) => Self::Multiple(ids),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_unlabelled() {
        assert_eq!(
            NeighbourClusters::classify(std::iter::empty()),
            NeighbourClusters::Unlabelled,
        );
    }

    #[test]
    fn repeated_label_is_single() {
        let id = ClusterId::new(4);
        assert_eq!(
            NeighbourClusters::classify([id, id, id]),
            NeighbourClusters::Single(id),
        );
    }

    #[test]
    fn noise_counts_as_a_cluster() {
        let classified = NeighbourClusters::classify([ClusterId::new(2), ClusterId::NOISE]);
        let NeighbourClusters::Multiple(ids) = classified else {
            panic!("expected multiple clusters, got {classified:?}");
        };
        assert_eq!(ids.first(), Some(&ClusterId::NOISE));
        assert_eq!(ids.len(), 2);
    }
}
