//! Point-to-cluster label mapping.

use crate::result::ClusterId;

/// Current label of every point; `None` until the scan visits the point.
#[derive(Clone, Debug)]
pub(crate) struct LabelStore {
    labels: Vec<Option<ClusterId>>,
}

impl LabelStore {
    pub(crate) fn new(items: usize) -> Self {
        Self {
            labels: vec![None; items],
        }
    }

    pub(crate) fn label_of(&self, point: usize) -> Option<ClusterId> {
        self.labels[point]
    }

    pub(crate) fn set(&mut self, point: usize, id: ClusterId) {
        self.labels[point] = Some(id);
    }

    /// Consumes the store. Points never visited are reported as noise, which
    /// cannot happen after a completed scan.
    pub(crate) fn into_labels(self) -> Vec<ClusterId> {
        self.labels
            .into_iter()
            .map(|label| label.unwrap_or(ClusterId::NOISE))
            .collect()
    }
}
