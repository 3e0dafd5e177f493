//! Builder utilities for configuring Wishart clustering runs.
//!
//! Exposes the execution strategy selection surface and the parameter
//! validation performed before constructing [`Wishart`] instances.

use std::num::NonZeroUsize;

use crate::{Result, cancel::CancellationToken, error::WishartError, wishart::Wishart};

/// Indicates how [`Wishart`] runs the neighbour query phase.
///
/// The scan itself is always sequential. `Auto` resolves deterministically:
/// to `Parallel` when the crate is built with the `parallel` feature and to
/// `Sequential` otherwise. Labels are identical under every strategy.
///
/// # Examples
/// ```
/// use wishart_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select the query backend automatically.
    Auto,
    /// Answer neighbour queries on the calling thread.
    Sequential,
    /// Answer neighbour queries on the rayon thread pool.
    Parallel,
}

impl ExecutionStrategy {
    /// Resolves `Auto` into the concrete strategy for this build.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::ExecutionStrategy;
    ///
    /// assert_eq!(
    ///     ExecutionStrategy::Sequential.resolve(),
    ///     ExecutionStrategy::Sequential,
    /// );
    /// assert_ne!(ExecutionStrategy::Auto.resolve(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub const fn resolve(self) -> Self {
        match self {
            Self::Auto if cfg!(feature = "parallel") => Self::Parallel,
            Self::Auto => Self::Sequential,
            other => other,
        }
    }
}

/// Configures and constructs [`Wishart`] instances.
///
/// # Examples
/// ```
/// use wishart_core::{ExecutionStrategy, WishartBuilder};
///
/// let wishart = WishartBuilder::new()
///     .with_wishart_neighbors(8)
///     .with_significance_level(0.2)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(wishart.wishart_neighbors().get(), 8);
/// assert_eq!(wishart.significance_level(), 0.2);
/// assert_eq!(wishart.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct WishartBuilder {
    wishart_neighbors: usize,
    significance_level: f64,
    execution_strategy: ExecutionStrategy,
    cancellation: Option<CancellationToken>,
}

impl Default for WishartBuilder {
    fn default() -> Self {
        Self {
            wishart_neighbors: 5,
            significance_level: 0.05,
            execution_strategy: ExecutionStrategy::Auto,
            cancellation: None,
        }
    }
}

impl WishartBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::{ExecutionStrategy, WishartBuilder};
    ///
    /// let builder = WishartBuilder::new();
    /// assert_eq!(builder.wishart_neighbors(), 5);
    /// assert_eq!(builder.significance_level(), 0.05);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of neighbours `k` consulted per point.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::WishartBuilder;
    ///
    /// let builder = WishartBuilder::new().with_wishart_neighbors(11);
    /// assert_eq!(builder.wishart_neighbors(), 11);
    /// ```
    #[must_use]
    pub fn with_wishart_neighbors(mut self, neighbours: usize) -> Self {
        self.wishart_neighbors = neighbours;
        self
    }

    /// Returns the configured neighbour count.
    #[must_use]
    pub fn wishart_neighbors(&self) -> usize {
        self.wishart_neighbors
    }

    /// Overrides the significance threshold `α` a cluster's score must reach.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::WishartBuilder;
    ///
    /// let builder = WishartBuilder::new().with_significance_level(0.5);
    /// assert_eq!(builder.significance_level(), 0.5);
    /// ```
    #[must_use]
    pub fn with_significance_level(mut self, level: f64) -> Self {
        self.significance_level = level;
        self
    }

    /// Returns the configured significance threshold.
    #[must_use]
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Sets the execution strategy to use when running the algorithm.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::{ExecutionStrategy, WishartBuilder};
    ///
    /// let builder = WishartBuilder::new().with_execution_strategy(ExecutionStrategy::Sequential);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Sequential);
    /// ```
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Attaches a token that aborts runs between scan steps once cancelled.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Validates the configuration and constructs a [`Wishart`] instance.
    ///
    /// # Errors
    /// Returns [`WishartError::InvalidNeighbourCount`] when the neighbour count
    /// is zero, [`WishartError::InvalidSignificanceLevel`] when the threshold is
    /// negative or not finite, and [`WishartError::BackendUnavailable`] when
    /// [`ExecutionStrategy::Parallel`] is requested without the `parallel`
    /// feature.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::{WishartBuilder, WishartErrorCode};
    ///
    /// let err = WishartBuilder::new()
    ///     .with_wishart_neighbors(0)
    ///     .build()
    ///     .expect_err("zero neighbours are rejected");
    /// assert_eq!(err.code(), WishartErrorCode::InvalidNeighbourCount);
    /// ```
    pub fn build(self) -> Result<Wishart> {
        let wishart_neighbors = NonZeroUsize::new(self.wishart_neighbors).ok_or(
            WishartError::InvalidNeighbourCount {
                got: self.wishart_neighbors,
            },
        )?;
        if !self.significance_level.is_finite() || self.significance_level < 0.0 {
            return Err(WishartError::InvalidSignificanceLevel {
                got: self.significance_level,
            });
        }
        if self.execution_strategy == ExecutionStrategy::Parallel && !cfg!(feature = "parallel") {
            return Err(WishartError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            });
        }

        Ok(Wishart::new(
            wishart_neighbors,
            self.significance_level,
            self.execution_strategy,
            self.cancellation,
        ))
    }
}
