//! The ordered Wishart scan.
//!
//! Points are visited in ascending trigger distance. Each visit looks at the
//! labels already held by the point's neighbours and either opens a cluster,
//! grows one, merges several into the lowest id, or settles a boundary by
//! freezing the significant clusters and dissolving the rest into noise.

mod decision;
mod significance;

#[cfg(test)]
mod tests;

use std::collections::BTreeSet;

use tracing::{debug, info, instrument};

use crate::{
    cancel::CancellationToken,
    error::{Result, WishartError},
    neighbours::NeighbourTable,
    result::ClusterId,
    session::ClusteringSession,
};

use self::{decision::NeighbourClusters, significance::SignificanceModel};

/// Run parameters consumed by the scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ScanParams {
    pub(crate) significance_level: f64,
    pub(crate) dimension: usize,
}

/// Counters reported once the scan completes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ScanStats {
    pub(crate) created: usize,
    pub(crate) merged: usize,
    pub(crate) dissolved: usize,
}

/// Raw labels produced by a completed scan, before compaction.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct ScanOutcome {
    pub(crate) labels: Vec<ClusterId>,
    pub(crate) stats: ScanStats,
}

/// Scans every point of `table` and returns the raw labels.
///
/// # Errors
/// Returns [`WishartError::Cancelled`] when `cancel` fires before the last
/// point is visited.
#[instrument(
    name = "core.scan",
    err,
    skip(table, params, cancel),
    fields(
        items = table.len(),
        k = table.k(),
        significance_level = params.significance_level,
    ),
)]
pub(crate) fn scan(
    table: &NeighbourTable,
    params: ScanParams,
    cancel: Option<&CancellationToken>,
) -> Result<ScanOutcome> {
    let mut scanner = Scanner::new(table, params);
    for point in table.scan_order() {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            debug!(point, "scan cancelled");
            return Err(WishartError::Cancelled);
        }
        scanner.visit(point);
    }
    let outcome = scanner.finish();
    info!(
        created = outcome.stats.created,
        merged = outcome.stats.merged,
        dissolved = outcome.stats.dissolved,
        "wishart scan completed"
    );
    Ok(outcome)
}

/// Single-step driver over a [`ClusteringSession`].
#[derive(Debug)]
pub(crate) struct Scanner<'t> {
    table: &'t NeighbourTable,
    significance_level: f64,
    model: SignificanceModel,
    session: ClusteringSession<'t>,
    stats: ScanStats,
}

impl<'t> Scanner<'t> {
    pub(crate) fn new(table: &'t NeighbourTable, params: ScanParams) -> Self {
        Self {
            table,
            significance_level: params.significance_level,
            model: SignificanceModel::new(table.k(), table.len(), params.dimension),
            session: ClusteringSession::new(table.trigger_distances()),
            stats: ScanStats::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn session(&self) -> &ClusteringSession<'t> {
        &self.session
    }

    /// Labels `point` from the labels of its neighbours.
    pub(crate) fn visit(&mut self, point: usize) {
        let adjacent = NeighbourClusters::classify(
            self.table
                .neighbours_of(point)
                .iter()
                .filter_map(|&neighbour| self.session.label_of(neighbour)),
        );
        match adjacent {
            NeighbourClusters::Unlabelled => {
                self.session.open_cluster(point);
                self.stats.created += 1;
            }
            NeighbourClusters::Single(id) if self.session.registry().is_significant(id) => {
                self.session.assign(point, ClusterId::NOISE);
            }
            NeighbourClusters::Single(id) => self.session.grow(point, id),
            NeighbourClusters::Multiple(ids) => self.resolve_contact(point, &ids),
        }
    }

    fn resolve_contact(&mut self, point: usize, ids: &BTreeSet<ClusterId>) {
        let registry = self.session.registry();
        if ids.iter().all(|&id| registry.is_significant(id)) {
            self.session.assign(point, ClusterId::NOISE);
            return;
        }

        let (significant, insignificant): (Vec<ClusterId>, Vec<ClusterId>) = ids
            .iter()
            .copied()
            .filter(|id| !id.is_noise())
            .partition(|&id| self.is_significant_now(id));
        let touches_frozen = ids.iter().any(|&id| registry.is_significant(id));
        let survivor = ids.first().copied().unwrap_or(ClusterId::NOISE);

        if significant.len() > 1 || survivor.is_noise() || touches_frozen {
            self.settle_boundary(point, significant, insignificant);
        } else {
            self.merge_into(point, survivor, ids);
        }
    }

    /// Frozen clusters stay significant; the rest are scored on their
    /// current range.
    fn is_significant_now(&self, id: ClusterId) -> bool {
        let registry = self.session.registry();
        registry.is_significant(id)
            || self.model.score_record(registry.record(id)) >= self.significance_level
    }

    fn settle_boundary(
        &mut self,
        point: usize,
        significant: Vec<ClusterId>,
        insignificant: Vec<ClusterId>,
    ) {
        self.session.mark_significant(significant);
        for id in insignificant {
            let moved = self.session.relocate_members(id, ClusterId::NOISE);
            debug!(cluster = %id, moved, "dissolved cluster into noise");
            self.stats.dissolved += 1;
        }
        self.session.assign(point, ClusterId::NOISE);
    }

    fn merge_into(&mut self, point: usize, survivor: ClusterId, ids: &BTreeSet<ClusterId>) {
        for &donor in ids.iter().filter(|&&id| id != survivor) {
            let moved = self.session.relocate_members(donor, survivor);
            debug!(cluster = %donor, into = %survivor, moved, "merged cluster");
            self.stats.merged += 1;
        }
        self.session.grow(point, survivor);
    }

    pub(crate) fn finish(self) -> ScanOutcome {
        ScanOutcome {
            labels: self.session.into_labels(),
            stats: self.stats,
        }
    }
}
