//! Benchmark support crate for Wishart clustering.
//!
//! Provides seeded synthetic point sets and parameter types shared by the
//! Criterion benchmarks for the two pipeline stages: the k-nearest-neighbour
//! query and the density scan.

pub mod error;
pub mod params;
pub mod source;
