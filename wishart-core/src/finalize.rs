//! Label compaction applied after the scan.
//!
//! Cluster ids allocated during the scan are sparse: merged and dissolved
//! clusters leave holes. The finalizer renumbers the ids that survive into a
//! dense `1..=m` range while keeping their relative order, and leaves noise
//! at `0`.

use std::collections::{BTreeSet, HashMap};

use crate::result::ClusterId;

/// Renumbers `labels` into a compact, order-preserving range.
///
/// Noise stays `0`; the smallest surviving real id becomes `1`, the next
/// `2`, and so on. Applying the function to its own output is the identity.
///
/// # Examples
/// ```
/// use wishart_core::{ClusterId, compact_labels};
///
/// let raw = [4, 0, 9, 4].map(ClusterId::new);
/// let compact: Vec<u64> = compact_labels(&raw).iter().map(|id| id.get()).collect();
/// assert_eq!(compact, vec![1, 0, 2, 1]);
/// ```
#[must_use]
pub fn compact_labels(labels: &[ClusterId]) -> Vec<ClusterId> {
    let present: BTreeSet<ClusterId> = labels
        .iter()
        .copied()
        .filter(|id| !id.is_noise())
        .collect();

    let renumbered: HashMap<ClusterId, ClusterId> = present
        .into_iter()
        .enumerate()
        .map(|(rank, id)| (id, ClusterId::from_index(rank + 1)))
        .collect();

    labels
        .iter()
        .map(|id| renumbered.get(id).copied().unwrap_or(ClusterId::NOISE))
        .collect()
}
