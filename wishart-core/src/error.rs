//! Error types for the Wishart core library.
//!
//! Defines error enums exposed by the public API and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{builder::ExecutionStrategy, result::ClusterId};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced by [`crate::DataSource`] operations or while validating
/// point sets.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum DataSourceError {
    /// Requested index was outside the source's bounds.
    #[error("index {index} is out of bounds")]
    OutOfBounds {
        /// The requested row that exceeded the source bounds.
        index: usize,
    },
    /// A point did not share the dimensionality of the first point.
    #[error("point {index} has dimension {found}, expected {expected}")]
    DimensionMismatch {
        /// Row whose dimensionality disagreed with the rest of the set.
        index: usize,
        /// Dimensionality of the first row.
        expected: usize,
        /// Dimensionality of the offending row.
        found: usize,
    },
    /// Data source contained no rows.
    #[error("data source contains no rows")]
    EmptyData,
    /// Data source rows must have positive dimension.
    #[error("data source vectors must have positive dimension")]
    ZeroDimension,
    /// A coordinate was NaN or infinite.
    #[error("point {index} has a non-finite value at component {component}")]
    NonFinite {
        /// Row containing the invalid coordinate.
        index: usize,
        /// Position of the invalid coordinate within the row.
        component: usize,
    },
    /// A neighbour query asked for more neighbours than the other points
    /// could supply, or for none at all.
    #[error("cannot return {k} neighbours per point from {items} items")]
    NeighbourQuery {
        /// Number of points in the queried source.
        items: usize,
        /// Requested neighbours per point.
        k: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`DataSourceError`] variants.
    enum DataSourceErrorCode for DataSourceError {
        /// Requested index was outside the source's bounds.
        OutOfBounds => OutOfBounds { .. } => "DATA_SOURCE_OUT_OF_BOUNDS",
        /// A point did not share the dimensionality of the first point.
        DimensionMismatch => DimensionMismatch { .. } => "DATA_SOURCE_DIMENSION_MISMATCH",
        /// Data source contained no rows.
        EmptyData => EmptyData => "DATA_SOURCE_EMPTY",
        /// Data source rows must have positive dimension.
        ZeroDimension => ZeroDimension => "DATA_SOURCE_ZERO_DIMENSION",
        /// A coordinate was NaN or infinite.
        NonFinite => NonFinite { .. } => "DATA_SOURCE_NON_FINITE",
        /// A neighbour query could not be answered with `k` entries per row.
        NeighbourQuery => NeighbourQuery { .. } => "DATA_SOURCE_NEIGHBOUR_QUERY",
    }
}

/// Error type produced when constructing or running [`crate::Wishart`].
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq)]
pub enum WishartError {
    /// `wishart_neighbors` must be at least one.
    #[error("wishart_neighbors must be at least 1 (got {got})")]
    InvalidNeighbourCount {
        /// The invalid neighbour count supplied by the caller.
        got: usize,
    },
    /// `significance_level` must be finite and non-negative.
    #[error("significance_level must be finite and non-negative (got {got})")]
    InvalidSignificanceLevel {
        /// The invalid significance level supplied by the caller.
        got: f64,
    },
    /// The supplied [`crate::DataSource`] contained no items.
    #[error("data source `{data_source}` contains no items")]
    EmptySource {
        /// Identifier for the empty data source.
        data_source: Arc<str>,
    },
    /// The [`crate::DataSource`] had too few items to query `wishart_neighbors`
    /// neighbours per point.
    #[error(
        "data source `{data_source}` has {items} items but wishart_neighbors={wishart_neighbors} requires more than that"
    )]
    InsufficientItems {
        /// Identifier for the data source that lacked sufficient items.
        data_source: Arc<str>,
        /// Number of items available in the data source.
        items: usize,
        /// Configured neighbour count.
        wishart_neighbors: usize,
    },
    /// A [`crate::DataSource`] operation failed while running the algorithm.
    #[error("data source `{data_source}` failed: {error}")]
    DataSource {
        /// Identifier for the data source that produced the error.
        data_source: Arc<str>,
        #[source]
        /// Underlying data source error bubbled up by the algorithm.
        error: DataSourceError,
    },
    /// A caller-supplied neighbour table does not describe the data source.
    #[error("neighbour table covers {table_items} items with k={table_k}, expected {items} items with k={k}")]
    NeighbourTableMismatch {
        /// Number of rows in the supplied table.
        table_items: usize,
        /// Neighbours per row in the supplied table.
        table_k: usize,
        /// Number of items in the data source.
        items: usize,
        /// Configured neighbour count.
        k: usize,
    },
    /// The requested cluster does not exist in the clustering result.
    #[error("cluster {cluster} does not exist or is the noise label")]
    UnknownCluster {
        /// Identifier that failed to resolve.
        cluster: ClusterId,
    },
    /// The requested execution backend is not compiled into this build.
    #[error("execution backend {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy requested by the caller.
        requested: ExecutionStrategy,
    },
    /// The run was cancelled through its [`crate::CancellationToken`].
    #[error("clustering run was cancelled")]
    Cancelled,
}

define_error_codes! {
    /// Stable codes describing [`WishartError`] variants.
    enum WishartErrorCode for WishartError {
        /// `wishart_neighbors` must be at least one.
        InvalidNeighbourCount => InvalidNeighbourCount { .. } => "WISHART_INVALID_NEIGHBOUR_COUNT",
        /// `significance_level` must be finite and non-negative.
        InvalidSignificanceLevel => InvalidSignificanceLevel { .. } => "WISHART_INVALID_SIGNIFICANCE_LEVEL",
        /// The supplied [`crate::DataSource`] contained no items.
        EmptySource => EmptySource { .. } => "WISHART_EMPTY_SOURCE",
        /// The [`crate::DataSource`] did not contain enough items.
        InsufficientItems => InsufficientItems { .. } => "WISHART_INSUFFICIENT_ITEMS",
        /// A [`crate::DataSource`] operation failed while running the algorithm.
        DataSourceFailure => DataSource { .. } => "WISHART_DATA_SOURCE_FAILURE",
        /// A caller-supplied neighbour table does not describe the data source.
        NeighbourTableMismatch => NeighbourTableMismatch { .. } => "WISHART_NEIGHBOUR_TABLE_MISMATCH",
        /// The requested cluster does not exist in the clustering result.
        UnknownCluster => UnknownCluster { .. } => "WISHART_UNKNOWN_CLUSTER",
        /// The requested execution backend is not compiled into this build.
        BackendUnavailable => BackendUnavailable { .. } => "WISHART_BACKEND_UNAVAILABLE",
        /// The run was cancelled.
        Cancelled => Cancelled => "WISHART_CANCELLED",
    }
}

impl WishartError {
    /// Retrieve the inner [`DataSourceErrorCode`] when the error originated in a [`crate::DataSource`].
    pub const fn data_source_code(&self) -> Option<DataSourceErrorCode> {
        match self {
            Self::DataSource { error, .. } => Some(error.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, WishartError>;
