//! Wishart density clustering core library.
//!
//! Points are visited in ascending order of their distance to the `k`-th
//! nearest neighbour. Clusters grow from the densest points outwards, merge
//! while they are statistically insignificant and freeze once a significant
//! cluster meets another cluster or noise.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod cancel;
mod centers;
mod datasource;
mod dense;
mod distance;
mod engine;
mod error;
mod finalize;
mod neighbours;
mod result;
mod session;
#[cfg(test)]
mod test_utils;
mod wishart;

pub use crate::{
    builder::{ExecutionStrategy, WishartBuilder},
    cancel::CancellationToken,
    centers::ClusterCenter,
    datasource::DataSource,
    dense::DenseVectors,
    distance::{DistanceError, euclidean_distance},
    error::{DataSourceError, DataSourceErrorCode, Result, WishartError, WishartErrorCode},
    finalize::compact_labels,
    neighbours::{BruteForceOracle, Neighbour, NeighbourOracle, NeighbourTable},
    result::{ClusterId, ClusteringResult, NonContiguousClusterIds},
    wishart::Wishart,
};
