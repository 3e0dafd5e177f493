//! Arena of cluster records addressed by stable integer ids.

use crate::result::ClusterId;

/// Distance range and significance flag of one cluster.
///
/// The range only ever widens while the cluster accepts members.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ClusterRecord {
    pub(crate) min_dist: f32,
    pub(crate) max_dist: f32,
    pub(crate) significant: bool,
}

impl ClusterRecord {
    const fn new(trigger: f32) -> Self {
        Self {
            min_dist: trigger,
            max_dist: trigger,
            significant: false,
        }
    }

    fn widen(&mut self, trigger: f32) {
        self.min_dist = self.min_dist.min(trigger);
        self.max_dist = self.max_dist.max(trigger);
    }
}

/// Per-run registry of clusters and their member lists.
///
/// Slot `0` is the noise cluster. Its record is a placeholder that is never
/// widened, scored or frozen; its member list collects noise points.
#[derive(Clone, Debug)]
pub(crate) struct ClusterRegistry {
    records: Vec<ClusterRecord>,
    members: Vec<Vec<usize>>,
}

impl ClusterRegistry {
    pub(crate) fn new() -> Self {
        Self {
            records: vec![ClusterRecord::new(0.0)],
            members: vec![Vec::new()],
        }
    }

    /// Allocates the next sequential id with a range collapsed onto `trigger`.
    pub(crate) fn create_cluster(&mut self, trigger: f32) -> ClusterId {
        let id = ClusterId::from_index(self.records.len());
        self.records.push(ClusterRecord::new(trigger));
        self.members.push(Vec::new());
        id
    }

    /// Widens the range of `id` to include `trigger`. Noise is left untouched.
    pub(crate) fn extend_cluster(&mut self, id: ClusterId, trigger: f32) {
        if id.is_noise() {
            return;
        }
        self.records[id.index()].widen(trigger);
    }

    /// Freezes every id in `ids`. Re-marking a frozen cluster is a no-op.
    pub(crate) fn mark_significant(&mut self, ids: impl IntoIterator<Item = ClusterId>) {
        for id in ids {
            if !id.is_noise() {
                self.records[id.index()].significant = true;
            }
        }
    }

    pub(crate) fn record(&self, id: ClusterId) -> &ClusterRecord {
        &self.records[id.index()]
    }

    pub(crate) fn is_significant(&self, id: ClusterId) -> bool {
        self.records[id.index()].significant
    }

    #[cfg(test)]
    pub(crate) fn members(&self, id: ClusterId) -> &[usize] {
        &self.members[id.index()]
    }

    pub(crate) fn push_member(&mut self, id: ClusterId, point: usize) {
        self.members[id.index()].push(point);
    }

    /// Empties the member list of `id`, handing the previous members back.
    pub(crate) fn clear_members(&mut self, id: ClusterId) -> Vec<usize> {
        std::mem::take(&mut self.members[id.index()])
    }

    /// Number of allocated ids, noise included.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}
