//! Support library for the `wishart` binary.
//!
//! Exposes the command pipeline and input providers so doctests and
//! integration tests can drive them without spawning a process.

pub mod cli;
pub mod delimited;
pub mod logging;
pub mod series;
