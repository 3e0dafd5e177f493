//! Shared test utilities used across wishart crates.

pub mod ci;
pub mod datasets;
pub mod tracing;
