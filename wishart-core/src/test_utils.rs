//! Shared test utilities for `wishart-core`.

use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

use proptest::test_runner::Config as ProptestConfig;
use wishart_test_support::ci::property_test_profile::ProptestRunProfile;

use crate::{datasource::DataSource, error::DataSourceError};

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `WISHART_PBT_CASES` and
/// `WISHART_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// One-dimensional [`DataSource`] that counts distance evaluations.
#[derive(Clone, Debug)]
pub(crate) struct CountingSource {
    data: Vec<f32>,
    calls: Arc<AtomicUsize>,
}

impl CountingSource {
    #[must_use]
    pub(crate) fn new(data: Vec<f32>, calls: Arc<AtomicUsize>) -> Self {
        Self { data, calls }
    }

    /// Returns the backing distance counter for assertions.
    #[must_use]
    pub(crate) fn calls(&self) -> &Arc<AtomicUsize> {
        &self.calls
    }
}

impl DataSource for CountingSource {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn name(&self) -> &str {
        "counting"
    }

    fn dimension(&self) -> usize {
        1
    }

    fn point(&self, index: usize) -> Result<&[f32], DataSourceError> {
        self.data
            .get(index)
            .map(std::slice::from_ref)
            .ok_or(DataSourceError::OutOfBounds { index })
    }

    fn distance(&self, left: usize, right: usize) -> Result<f32, DataSourceError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let a = self.point(left)?[0];
        let b = self.point(right)?[0];
        Ok((a - b).abs())
    }
}
