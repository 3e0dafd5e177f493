//! Materialized neighbour query results.

use crate::neighbours::Neighbour;

/// Immutable k-nearest-neighbour lists and trigger distances for a point set.
///
/// Rows are stored flat: the neighbours of point `p` occupy
/// `indices[p * k..(p + 1) * k]`.
///
/// # Examples
/// ```
/// use wishart_core::{Neighbour, NeighbourTable};
///
/// let table = NeighbourTable::from_rows(1, vec![
///     vec![Neighbour { id: 1, distance: 1.0 }],
///     vec![Neighbour { id: 0, distance: 1.0 }],
///     vec![Neighbour { id: 1, distance: 2.0 }],
/// ])
/// .expect("every row has one neighbour");
/// assert_eq!(table.len(), 3);
/// assert_eq!(table.neighbours_of(2), &[1]);
/// assert_eq!(table.trigger_distance(2), 2.0);
/// assert_eq!(table.scan_order(), vec![0, 1, 2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct NeighbourTable {
    k: usize,
    indices: Vec<usize>,
    trigger_distances: Vec<f32>,
}

impl NeighbourTable {
    /// Builds a table from per-point neighbour rows sorted nearest first.
    ///
    /// Returns `None` when `k` is zero or when any row does not hold exactly
    /// `k` neighbours.
    #[must_use]
    pub fn from_rows(k: usize, rows: Vec<Vec<Neighbour>>) -> Option<Self> {
        if k == 0 {
            return None;
        }
        let mut indices = Vec::with_capacity(rows.len() * k);
        let mut trigger_distances = Vec::with_capacity(rows.len());
        for row in rows {
            if row.len() != k {
                return None;
            }
            trigger_distances.push(row.last()?.distance);
            indices.extend(row.iter().map(|neighbour| neighbour.id));
        }
        Some(Self {
            k,
            indices,
            trigger_distances,
        })
    }

    /// Number of points covered by the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.trigger_distances.len()
    }

    /// Returns whether the table covers no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.trigger_distances.is_empty()
    }

    /// Neighbours listed per point.
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// Neighbour indices of `point`, nearest first.
    ///
    /// # Panics
    /// Panics when `point` is not covered by the table.
    #[must_use]
    pub fn neighbours_of(&self, point: usize) -> &[usize] {
        &self.indices[point * self.k..(point + 1) * self.k]
    }

    /// Distance from `point` to its `k`-th nearest neighbour.
    ///
    /// # Panics
    /// Panics when `point` is not covered by the table.
    #[must_use]
    pub fn trigger_distance(&self, point: usize) -> f32 {
        self.trigger_distances[point]
    }

    /// Trigger distances of every point, in input order.
    #[must_use]
    pub fn trigger_distances(&self) -> &[f32] {
        &self.trigger_distances
    }

    /// Returns the largest neighbour index referenced by the table.
    pub(crate) fn max_index(&self) -> Option<usize> {
        self.indices.iter().copied().max()
    }

    /// Point indices in ascending trigger distance, ties kept in input order.
    #[must_use]
    pub fn scan_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.len()).collect();
        order.sort_by(|&left, &right| {
            self.trigger_distances[left].total_cmp(&self.trigger_distances[right])
        });
        order
    }
}
