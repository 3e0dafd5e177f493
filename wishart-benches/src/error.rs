//! Benchmark setup error type.
//!
//! Lets setup functions propagate failures with `?` instead of panicking
//! inside Criterion closures.

use wishart_core::{DataSourceError, WishartError};

/// Errors that may occur during benchmark setup.
#[derive(Debug, thiserror::Error)]
pub enum BenchSetupError {
    /// A zero value was passed where a positive count was required.
    #[error("expected a non-zero value for {context}")]
    ZeroValue {
        /// The parameter that was unexpectedly zero.
        context: &'static str,
    },
    /// The generated rows were rejected as a point set.
    #[error("data source error: {0}")]
    DataSource(#[from] DataSourceError),
    /// Building or running the clusterer failed.
    #[error("wishart operation failed: {0}")]
    Wishart(#[from] WishartError),
}
