//! Clustering orchestration for the Wishart library.
//!
//! Provides the [`Wishart`] runtime entry point, which validates its input,
//! queries neighbours, drives the scan and compacts the resulting labels.

use std::{num::NonZeroUsize, sync::Arc};

use tracing::{debug, instrument, warn};

use crate::{
    Result,
    builder::ExecutionStrategy,
    cancel::CancellationToken,
    centers::{ClusterCenter, densest_point},
    datasource::DataSource,
    dense::DenseVectors,
    engine::{self, ScanParams},
    error::{DataSourceError, WishartError},
    neighbours::{BruteForceOracle, NeighbourOracle, NeighbourTable},
    result::{ClusterId, ClusteringResult},
};

/// Entry point for running Wishart clustering.
///
/// # Examples
/// ```
/// use wishart_core::{DenseVectors, WishartBuilder};
///
/// let points = DenseVectors::try_from_flat(
///     "pairs",
///     1,
///     vec![0.0, 1.0, 2.0, 3.0, 20.0, 21.0, 22.0, 23.0],
/// )?;
/// let wishart = WishartBuilder::new()
///     .with_wishart_neighbors(2)
///     .build()?;
/// let result = wishart.run(&points)?;
/// assert_eq!(result.cluster_count(), 2);
/// assert_eq!(result.members(result.assignments()[0]), vec![0, 1, 2, 3]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Wishart {
    wishart_neighbors: NonZeroUsize,
    significance_level: f64,
    execution_strategy: ExecutionStrategy,
    cancellation: Option<CancellationToken>,
}

impl Wishart {
    pub(crate) fn new(
        wishart_neighbors: NonZeroUsize,
        significance_level: f64,
        execution_strategy: ExecutionStrategy,
        cancellation: Option<CancellationToken>,
    ) -> Self {
        Self {
            wishart_neighbors,
            significance_level,
            execution_strategy,
            cancellation,
        }
    }

    /// Returns the number of neighbours consulted per point.
    #[must_use]
    pub fn wishart_neighbors(&self) -> NonZeroUsize {
        self.wishart_neighbors
    }

    /// Returns the significance threshold clusters must reach.
    #[must_use]
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Returns the execution strategy that will be used when running.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::{ExecutionStrategy, WishartBuilder};
    ///
    /// let wishart = WishartBuilder::new()
    ///     .with_execution_strategy(ExecutionStrategy::Sequential)
    ///     .build()
    ///     .expect("builder must apply execution strategy");
    /// assert_eq!(wishart.execution_strategy(), ExecutionStrategy::Sequential);
    /// ```
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Clusters `source` using the built-in exact neighbour oracle.
    ///
    /// # Errors
    /// Returns [`WishartError::EmptySource`] when the source is empty,
    /// [`WishartError::InsufficientItems`] when it holds no more points than
    /// the neighbour count, [`WishartError::DataSource`] when reading a point
    /// fails or a point's length disagrees with [`DataSource::dimension`],
    /// and [`WishartError::Cancelled`] when the run is cancelled.
    pub fn run<D>(&self, source: &D) -> Result<ClusteringResult>
    where
        D: DataSource + Sync + ?Sized,
    {
        self.run_with_oracle(source, &self.oracle())
    }

    /// Clusters `source` using neighbours answered by `oracle`.
    ///
    /// # Errors
    /// As [`Wishart::run`], plus [`WishartError::NeighbourTableMismatch`]
    /// when the oracle returns a table that does not describe `source`.
    #[instrument(
        name = "core.run",
        err,
        skip(self, source, oracle),
        fields(
            data_source = %source.name(),
            items = source.len(),
            wishart_neighbors = self.wishart_neighbors.get(),
            significance_level = self.significance_level,
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run_with_oracle<D, O>(&self, source: &D, oracle: &O) -> Result<ClusteringResult>
    where
        D: DataSource + Sync + ?Sized,
        O: NeighbourOracle,
    {
        self.validate_source(source)?;
        let table = oracle
            .neighbours(source, self.wishart_neighbors.get())
            .map_err(|error| wrap_datasource_error(source, error))?;
        self.validate_table(source, &table)?;
        self.scan(source, &table)
    }

    /// Clusters `source` from a precomputed neighbour table.
    ///
    /// # Errors
    /// As [`Wishart::run_with_oracle`]; the table must hold one row per point
    /// with exactly [`Wishart::wishart_neighbors`] entries. Every point is
    /// still read once so ragged sources are rejected before the scan.
    #[instrument(
        name = "core.run",
        err,
        skip(self, source, table),
        fields(
            data_source = %source.name(),
            items = source.len(),
            wishart_neighbors = self.wishart_neighbors.get(),
            significance_level = self.significance_level,
            strategy = "precomputed",
        ),
    )]
    pub fn run_with_neighbours<D>(
        &self,
        source: &D,
        table: &NeighbourTable,
    ) -> Result<ClusteringResult>
    where
        D: DataSource + ?Sized,
    {
        self.validate_source(source)?;
        self.validate_table(source, table)?;
        self.scan(source, table)
    }

    /// Finds the most central member of `cluster`.
    ///
    /// Members are re-queried among themselves with `k` clamped to the
    /// cluster size minus one; the member with the smallest `k`-th neighbour
    /// distance wins, ties going to the lower index.
    ///
    /// # Errors
    /// Returns [`WishartError::UnknownCluster`] for the noise label or an id
    /// with no members, and [`WishartError::DataSource`] when a member cannot
    /// be read.
    ///
    /// # Examples
    /// ```
    /// use wishart_core::{DenseVectors, WishartBuilder};
    ///
    /// let points = DenseVectors::try_from_flat("line", 1, vec![0.0, 1.0, 2.0, 3.0, 9.0])?;
    /// let wishart = WishartBuilder::new().with_wishart_neighbors(2).build()?;
    /// let result = wishart.run(&points)?;
    /// let center = wishart.find_center(&points, &result, result.assignments()[1])?;
    /// assert_eq!(center.index, 1);
    /// assert_eq!(center.position, vec![1.0]);
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    #[instrument(
        name = "core.find_center",
        err,
        skip(self, source, result, cluster),
        fields(data_source = %source.name(), cluster = %cluster),
    )]
    pub fn find_center<D>(
        &self,
        source: &D,
        result: &ClusteringResult,
        cluster: ClusterId,
    ) -> Result<ClusterCenter>
    where
        D: DataSource + Sync + ?Sized,
    {
        if cluster.is_noise() {
            return Err(WishartError::UnknownCluster { cluster });
        }
        let members = result.members(cluster);
        if members.is_empty() {
            return Err(WishartError::UnknownCluster { cluster });
        }

        let subset = DenseVectors::select(source, &members)
            .map_err(|error| wrap_datasource_error(source, error))?;
        let local = densest_point(&subset, self.wishart_neighbors.get(), self.oracle())
            .map_err(|error| wrap_datasource_error(source, error))?;
        let index = members[local];
        let position = source
            .point(index)
            .map_err(|error| wrap_datasource_error(source, error))?
            .to_vec();
        debug!(index, members = members.len(), "located cluster center");
        Ok(ClusterCenter {
            cluster,
            index,
            position,
        })
    }

    /// Finds the center of every non-noise cluster, in ascending id order.
    ///
    /// # Errors
    /// Propagates the first error raised by [`Wishart::find_center`].
    pub fn find_centers<D>(
        &self,
        source: &D,
        result: &ClusteringResult,
    ) -> Result<Vec<ClusterCenter>>
    where
        D: DataSource + Sync + ?Sized,
    {
        result
            .cluster_ids()
            .map(|cluster| self.find_center(source, result, cluster))
            .collect()
    }

    fn oracle(&self) -> BruteForceOracle {
        match self.execution_strategy.resolve() {
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => BruteForceOracle::parallel(),
            _ => BruteForceOracle::sequential(),
        }
    }

    fn validate_source<D: DataSource + ?Sized>(&self, source: &D) -> Result<()> {
        let items = source.len();
        if items == 0 {
            warn!(
                data_source = source.name(),
                "data source is empty, returning error"
            );
            return Err(WishartError::EmptySource {
                data_source: Arc::from(source.name()),
            });
        }
        if items <= self.wishart_neighbors.get() {
            return Err(WishartError::InsufficientItems {
                data_source: Arc::from(source.name()),
                items,
                wishart_neighbors: self.wishart_neighbors.get(),
            });
        }
        let expected = source.dimension();
        if expected == 0 {
            return Err(wrap_datasource_error(
                source,
                DataSourceError::ZeroDimension,
            ));
        }
        for index in 0..items {
            let found = source
                .point(index)
                .map_err(|error| wrap_datasource_error(source, error))?
                .len();
            if found != expected {
                return Err(wrap_datasource_error(
                    source,
                    DataSourceError::DimensionMismatch {
                        index,
                        expected,
                        found,
                    },
                ));
            }
        }
        Ok(())
    }

    fn validate_table<D: DataSource + ?Sized>(
        &self,
        source: &D,
        table: &NeighbourTable,
    ) -> Result<()> {
        let items = source.len();
        let k = self.wishart_neighbors.get();
        if table.len() != items || table.k() != k {
            return Err(WishartError::NeighbourTableMismatch {
                table_items: table.len(),
                table_k: table.k(),
                items,
                k,
            });
        }
        match table.max_index() {
            Some(index) if index >= items => Err(wrap_datasource_error(
                source,
                DataSourceError::OutOfBounds { index },
            )),
            _ => Ok(()),
        }
    }

    fn scan<D: DataSource + ?Sized>(
        &self,
        source: &D,
        table: &NeighbourTable,
    ) -> Result<ClusteringResult> {
        let params = ScanParams {
            significance_level: self.significance_level,
            dimension: source.dimension(),
        };
        let outcome = engine::scan(table, params, self.cancellation.as_ref())?;
        let result = ClusteringResult::from_raw_labels(&outcome.labels);
        debug!(
            clusters = result.cluster_count(),
            noise = result.noise_count(),
            "labels finalized"
        );
        Ok(result)
    }
}

fn wrap_datasource_error<D: DataSource + ?Sized>(source: &D, error: DataSourceError) -> WishartError {
    WishartError::DataSource {
        data_source: Arc::from(source.name()),
        error,
    }
}
