//! Property tests over complete clustering runs.

use proptest::{prelude::*, test_runner::Config as ProptestConfig};
use wishart_core::{ClusterId, ClusteringResult, DenseVectors, WishartBuilder, compact_labels};
use wishart_test_support::ci::property_test_profile::ProptestRunProfile;

fn config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

fn run_input() -> impl Strategy<Value = (DenseVectors, usize, f64)> {
    (1_usize..=3, 1_usize..=5).prop_flat_map(|(dimension, k)| {
        (
            prop::collection::vec(-10.0_f32..10.0, ((k + 1) * dimension)..=(40 * dimension))
                .prop_map(move |mut values| {
                    values.truncate(values.len() - values.len() % dimension);
                    DenseVectors::try_from_flat("random", dimension, values)
                        .expect("finite values with whole rows")
                }),
            Just(k),
            prop_oneof![Just(0.0), Just(0.05), Just(1.0), Just(1e6)],
        )
    })
}

fn run(points: &DenseVectors, k: usize, alpha: f64) -> ClusteringResult {
    WishartBuilder::new()
        .with_wishart_neighbors(k)
        .with_significance_level(alpha)
        .build()
        .expect("configuration must be valid")
        .run(points)
        .expect("run must succeed")
}

proptest! {
    #![proptest_config(config(64))]

    #[test]
    fn labels_cover_every_point_compactly((points, k, alpha) in run_input()) {
        let result = run(&points, k, alpha);
        let labels = result.assignments();
        prop_assert_eq!(labels.len(), points.rows().count());

        let noise = labels.iter().filter(|id| id.is_noise()).count();
        prop_assert_eq!(noise, result.noise_count());
        prop_assert_eq!(result.has_noise(), noise > 0);

        let max = labels.iter().map(|id| id.get()).max().unwrap_or(0);
        prop_assert_eq!(max, result.cluster_count() as u64);
        for id in 1..=max {
            prop_assert!(labels.contains(&ClusterId::new(id)), "label {} unused", id);
        }
    }

    #[test]
    fn finalized_labels_are_a_fixed_point((points, k, alpha) in run_input()) {
        let result = run(&points, k, alpha);
        prop_assert_eq!(compact_labels(result.assignments()), result.assignments().to_vec());
    }

    #[test]
    fn runs_are_deterministic((points, k, alpha) in run_input()) {
        prop_assert_eq!(run(&points, k, alpha), run(&points, k, alpha));
    }
}
