//! Mutable state of a single clustering run.
//!
//! [`ClusteringSession`] owns the cluster registry and the label store and
//! keeps them consistent: every label change goes through
//! [`ClusteringSession::assign`], which also records the point in the
//! registry's member list for its new cluster. A session is created per run
//! and dropped when the labels are extracted.

mod labels;
mod registry;

use crate::result::ClusterId;

use self::{labels::LabelStore, registry::ClusterRegistry};

pub(crate) use self::registry::ClusterRecord;

#[derive(Debug)]
pub(crate) struct ClusteringSession<'t> {
    registry: ClusterRegistry,
    labels: LabelStore,
    triggers: &'t [f32],
}

impl<'t> ClusteringSession<'t> {
    pub(crate) fn new(triggers: &'t [f32]) -> Self {
        Self {
            registry: ClusterRegistry::new(),
            labels: LabelStore::new(triggers.len()),
            triggers,
        }
    }

    pub(crate) fn registry(&self) -> &ClusterRegistry {
        &self.registry
    }

    pub(crate) fn label_of(&self, point: usize) -> Option<ClusterId> {
        self.labels.label_of(point)
    }

    pub(crate) fn trigger(&self, point: usize) -> f32 {
        self.triggers[point]
    }

    /// Labels `point` with `id` and appends it to the member list of `id`.
    pub(crate) fn assign(&mut self, point: usize, id: ClusterId) {
        self.labels.set(point, id);
        self.registry.push_member(id, point);
    }

    /// Opens a new cluster around `point`.
    pub(crate) fn open_cluster(&mut self, point: usize) -> ClusterId {
        let id = self.registry.create_cluster(self.trigger(point));
        self.assign(point, id);
        id
    }

    /// Widens `id` with the trigger distance of `point` and assigns it.
    pub(crate) fn grow(&mut self, point: usize, id: ClusterId) {
        self.registry.extend_cluster(id, self.trigger(point));
        self.assign(point, id);
    }

    /// Moves every current member of `from` into `to` and clears `from`.
    ///
    /// When `to` is a real cluster its range widens with each member's
    /// trigger distance; relocating into noise dissolves `from`. The registry
    /// record of `from` survives with its range intact. Returns the number of
    /// relocated points.
    pub(crate) fn relocate_members(&mut self, from: ClusterId, to: ClusterId) -> usize {
        let members = self.registry.clear_members(from);
        for &point in &members {
            self.grow(point, to);
        }
        members.len()
    }

    pub(crate) fn mark_significant(&mut self, ids: impl IntoIterator<Item = ClusterId>) {
        self.registry.mark_significant(ids);
    }

    pub(crate) fn into_labels(self) -> Vec<ClusterId> {
        self.labels.into_labels()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_keeps_labels_and_members_in_step() {
        let triggers = [0.1, 0.2, 0.3];
        let mut session = ClusteringSession::new(&triggers);
        let id = session.open_cluster(0);
        session.grow(1, id);
        session.assign(2, ClusterId::NOISE);

        assert_eq!(session.label_of(0), Some(id));
        assert_eq!(session.label_of(1), Some(id));
        assert_eq!(session.label_of(2), Some(ClusterId::NOISE));
        assert_eq!(session.registry().members(id), &[0, 1]);
        assert_eq!(session.registry().members(ClusterId::NOISE), &[2]);
    }

    #[test]
    fn relocate_into_cluster_widens_target() {
        let triggers = [0.5, 0.6, 2.0, 3.0];
        let mut session = ClusteringSession::new(&triggers);
        let survivor = session.open_cluster(0);
        session.grow(1, survivor);
        let donor = session.open_cluster(2);
        session.grow(3, donor);

        let moved = session.relocate_members(donor, survivor);

        assert_eq!(moved, 2);
        assert_eq!(session.registry().members(survivor), &[0, 1, 2, 3]);
        assert!(session.registry().members(donor).is_empty());
        let record = session.registry().record(survivor);
        assert_eq!((record.min_dist, record.max_dist), (0.5, 3.0));
        let donor_record = session.registry().record(donor);
        assert_eq!((donor_record.min_dist, donor_record.max_dist), (2.0, 3.0));
        assert_eq!(session.label_of(3), Some(survivor));
    }

    #[test]
    fn relocate_into_noise_dissolves_cluster() {
        let triggers = [0.5, 0.6];
        let mut session = ClusteringSession::new(&triggers);
        let id = session.open_cluster(0);
        session.grow(1, id);

        session.relocate_members(id, ClusterId::NOISE);

        assert!(session.registry().members(id).is_empty());
        assert_eq!(session.registry().members(ClusterId::NOISE), &[0, 1]);
        assert_eq!(
            session.into_labels(),
            vec![ClusterId::NOISE, ClusterId::NOISE]
        );
    }
}
