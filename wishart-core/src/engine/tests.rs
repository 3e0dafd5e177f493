//! Branch-level and property tests for the scan.

use proptest::prelude::*;
use rstest::rstest;

use super::*;
use crate::{
    DenseVectors,
    neighbours::{BruteForceOracle, Neighbour, NeighbourOracle},
    session::ClusterRecord,
    test_utils::suite_proptest_config,
};

const DIM: usize = 1;
const TINY_ALPHA: f64 = 1e-6;

/// Builds a table from `(trigger, neighbours)` rows. Only the last
/// neighbour's distance matters, so the others reuse the trigger.
fn table(k: usize, rows: &[(f32, &[usize])]) -> NeighbourTable {
    let rows = rows
        .iter()
        .map(|&(trigger, neighbours)| {
            neighbours
                .iter()
                .map(|&id| Neighbour {
                    id,
                    distance: trigger,
                })
                .collect()
        })
        .collect();
    NeighbourTable::from_rows(k, rows).expect("rows are uniform")
}

fn params(significance_level: f64) -> ScanParams {
    ScanParams {
        significance_level,
        dimension: DIM,
    }
}

fn ids(raw: &[u64]) -> Vec<ClusterId> {
    raw.iter().copied().map(ClusterId::new).collect()
}

/// Two pairs that meet at a bridging point. Every cluster has a collapsed
/// range, so they score zero.
fn two_pairs_and_bridge() -> NeighbourTable {
    table(
        2,
        &[
            (1.0, &[1, 4]),
            (1.0, &[0, 4]),
            (1.5, &[3, 4]),
            (1.5, &[2, 4]),
            (2.0, &[1, 2]),
        ],
    )
}

#[test]
fn insignificant_neighbours_merge_into_lowest_id() {
    let table = two_pairs_and_bridge();
    let mut scanner = Scanner::new(&table, params(1e12));
    for point in table.scan_order() {
        scanner.visit(point);
    }

    let registry = scanner.session().registry();
    let survivor = ClusterId::new(1);
    let donor = ClusterId::new(2);
    assert_eq!(registry.members(survivor), &[0, 1, 2, 3, 4]);
    assert!(registry.members(donor).is_empty());
    let record = registry.record(survivor);
    assert_eq!((record.min_dist, record.max_dist), (1.0, 2.0));
    let donor_record = registry.record(donor);
    assert_eq!((donor_record.min_dist, donor_record.max_dist), (1.5, 1.5));

    let outcome = scanner.finish();
    assert_eq!(outcome.labels, ids(&[1, 1, 1, 1, 1]));
    assert_eq!(
        outcome.stats,
        ScanStats {
            created: 2,
            merged: 1,
            dissolved: 0,
        }
    );
}

#[test]
fn two_significant_neighbours_freeze_and_reject_the_bridge() {
    let table = two_pairs_and_bridge();
    let mut scanner = Scanner::new(&table, params(0.0));
    for point in table.scan_order() {
        scanner.visit(point);
    }

    let registry = scanner.session().registry();
    assert!(registry.is_significant(ClusterId::new(1)));
    assert!(registry.is_significant(ClusterId::new(2)));
    assert_eq!(scanner.finish().labels, ids(&[1, 1, 2, 2, 0]));
}

#[test]
fn insignificant_clusters_dissolve_at_a_boundary() {
    let table = table(
        3,
        &[
            (0.5, &[1, 6, 7]),
            (0.6, &[0, 6, 7]),
            (0.7, &[3, 6, 7]),
            (0.8, &[2, 6, 7]),
            (0.9, &[5, 6, 7]),
            (0.9, &[4, 6, 7]),
            (1.1, &[1, 3, 5]),
            (1.2, &[0, 2, 4]),
            (1.3, &[0, 1, 9]),
            (1.4, &[8, 7, 6]),
        ],
    );
    let mut scanner = Scanner::new(&table, params(TINY_ALPHA));
    for point in table.scan_order() {
        scanner.visit(point);
    }

    let registry = scanner.session().registry();
    assert!(registry.is_significant(ClusterId::new(1)));
    assert!(registry.is_significant(ClusterId::new(2)));
    assert!(!registry.is_significant(ClusterId::new(3)));
    assert!(registry.members(ClusterId::new(3)).is_empty());
    assert_eq!(registry.members(ClusterId::new(1)), &[0, 1]);

    let outcome = scanner.finish();
    assert_eq!(outcome.labels, ids(&[1, 1, 2, 2, 0, 0, 0, 0, 0, 0]));
    assert_eq!(
        outcome.stats,
        ScanStats {
            created: 3,
            merged: 0,
            dissolved: 1,
        }
    );
}

#[test]
fn contact_with_noise_dissolves_instead_of_merging() {
    let table = table(
        2,
        &[
            (0.5, &[1, 2]),
            (0.6, &[0, 2]),
            (0.7, &[3, 5]),
            (0.8, &[2, 5]),
            (0.9, &[1, 3]),
            (1.0, &[6, 7]),
            (1.0, &[5, 7]),
            (1.1, &[4, 6]),
        ],
    );
    let outcome = scan(&table, params(TINY_ALPHA), None).expect("scan must succeed");
    assert_eq!(outcome.labels, ids(&[1, 1, 2, 2, 0, 0, 0, 0]));
    assert_eq!(outcome.stats.dissolved, 1);
}

#[test]
fn frozen_cluster_rejects_a_point_it_alone_touches() {
    let table = table(
        2,
        &[
            (0.5, &[1, 4]),
            (0.6, &[0, 4]),
            (0.7, &[3, 4]),
            (0.8, &[2, 4]),
            (0.9, &[1, 2]),
            (1.0, &[0, 1]),
        ],
    );
    let mut scanner = Scanner::new(&table, params(TINY_ALPHA));
    for point in 0..5 {
        scanner.visit(point);
    }
    let frozen = *scanner.session().registry().record(ClusterId::new(1));
    assert!(frozen.significant);

    scanner.visit(5);

    let registry = scanner.session().registry();
    assert_eq!(*registry.record(ClusterId::new(1)), frozen);
    assert_eq!(registry.members(ClusterId::new(1)), &[0, 1]);
    assert_eq!(scanner.session().label_of(5), Some(ClusterId::NOISE));
}

#[test]
fn frozen_cluster_is_never_a_merge_survivor() {
    // Cluster 1 is frozen by the bridge at point 4. Cluster 3, created later
    // with a collapsed range, then touches it alongside nothing else
    // significant.
    let table = table(
        2,
        &[
            (0.5, &[1, 4]),
            (0.6, &[0, 4]),
            (0.7, &[3, 4]),
            (0.8, &[2, 4]),
            (0.9, &[1, 2]),
            (1.0, &[6, 7]),
            (1.0, &[5, 7]),
            (1.1, &[0, 5]),
        ],
    );
    let outcome = scan(&table, params(TINY_ALPHA), None).expect("scan must succeed");
    assert_eq!(outcome.labels, ids(&[1, 1, 2, 2, 0, 0, 0, 0]));
    assert_eq!(outcome.stats.merged, 0);
}

#[test]
fn duplicate_points_share_a_cluster() {
    let table = table(
        1,
        &[(0.0, &[1]), (0.0, &[0]), (3.0, &[1]), (4.0, &[2])],
    );
    let outcome = scan(&table, params(1e12), None).expect("scan must succeed");
    assert_eq!(outcome.labels.len(), 4);
    assert_eq!(outcome.labels[0], outcome.labels[1]);
    assert!(!outcome.labels[0].is_noise());
}

#[rstest]
#[case(0.0)]
#[case(TINY_ALPHA)]
#[case(1e12)]
fn pre_cancelled_scan_fails(#[case] significance_level: f64) {
    let token = CancellationToken::new();
    token.cancel();
    let err = scan(&two_pairs_and_bridge(), params(significance_level), Some(&token))
        .expect_err("cancelled scan must fail");
    assert_eq!(err, WishartError::Cancelled);
}

fn brute_force_table(values: &[f32], k: usize) -> NeighbourTable {
    let points = DenseVectors::try_from_flat("line", 1, values.to_vec()).expect("finite values");
    BruteForceOracle::sequential()
        .neighbours(&points, k)
        .expect("query must succeed")
}

#[derive(Clone, Debug)]
struct Snapshot {
    record: ClusterRecord,
    members: Vec<usize>,
}

fn snapshot(scanner: &Scanner<'_>) -> Vec<Snapshot> {
    let registry = scanner.session().registry();
    (0..registry.len())
        .map(ClusterId::from_index)
        .map(|id| Snapshot {
            record: *registry.record(id),
            members: registry.members(id).to_vec(),
        })
        .collect()
}

fn scan_input() -> impl Strategy<Value = (Vec<f32>, usize, f64)> {
    (1_usize..=4).prop_flat_map(|k| {
        (
            prop::collection::vec(-50.0_f32..50.0, (k + 1)..48),
            Just(k),
            prop_oneof![Just(0.0), Just(TINY_ALPHA), Just(0.01), Just(1.0), Just(1e12)],
        )
    })
}

proptest! {
    #![proptest_config(suite_proptest_config(96))]

    #[test]
    fn ranges_widen_and_frozen_clusters_stay_put((values, k, alpha) in scan_input()) {
        let table = brute_force_table(&values, k);
        let mut scanner = Scanner::new(&table, params(alpha));
        let mut previous = snapshot(&scanner);

        for point in table.scan_order() {
            scanner.visit(point);
            prop_assert!(scanner.session().label_of(point).is_some());
            let current = snapshot(&scanner);
            for (id, (before, after)) in previous.iter().zip(&current).enumerate().skip(1) {
                prop_assert!(after.record.min_dist <= after.record.max_dist);
                prop_assert!(after.record.min_dist <= before.record.min_dist);
                prop_assert!(after.record.max_dist >= before.record.max_dist);
                if before.record.significant {
                    prop_assert!(after.record.significant, "cluster {id} thawed");
                    prop_assert_eq!(after.record, before.record);
                    prop_assert_eq!(&after.members, &before.members);
                }
            }
            previous = current;
        }
    }

    #[test]
    fn scan_is_deterministic((values, k, alpha) in scan_input()) {
        let table = brute_force_table(&values, k);
        let first = scan(&table, params(alpha), None).expect("scan must succeed");
        let second = scan(&table, params(alpha), None).expect("scan must succeed");
        prop_assert_eq!(first, second);
    }
}
