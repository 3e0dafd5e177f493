//! Chaotic time series and their delay embeddings.
//!
//! Each map is iterated in `f64` from a fixed starting state and narrowed to
//! `f32` on output. The Lorenz series is not integrated here; it is read from
//! a text file holding one value per line.

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use clap::ValueEnum;
use thiserror::Error;
use wishart_core::{DataSourceError, DenseVectors};

const LOGISTIC_R: f64 = 4.0;
const LOGISTIC_X0: f64 = 0.4;
const SKEW_TENT_OMEGA: f64 = 0.1847;
const SKEW_TENT_X0: f64 = 0.5;
const SCHUSTER_Z: f64 = 2.0;
const SCHUSTER_X0: f64 = 0.5;
const HENON_A: f64 = 1.4;
const HENON_B: f64 = 0.3;
const HENON_X0: f64 = 0.4;
const HENON_Y0: f64 = 0.4;

/// Series generators understood by [`generate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ChaoticMap {
    /// `x' = r x (1 - x)` with `r = 4`.
    Logistic,
    /// Piecewise-linear tent with its peak at `ω = 0.1847`.
    SkewTent,
    /// Fractional part of `x + x^z` with `z = 2`.
    Schuster,
    /// `x` component of the Hénon map with `a = 1.4`, `b = 0.3`.
    Henon,
    /// Pre-computed Lorenz series read from a file.
    Lorenz,
}

impl ChaoticMap {
    /// Lowercase name used on the command line and in data source names.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logistic => "logistic",
            Self::SkewTent => "skew-tent",
            Self::Schuster => "schuster",
            Self::Henon => "henon",
            Self::Lorenz => "lorenz",
        }
    }
}

/// Errors raised while producing or embedding a series.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// The Lorenz series was requested without an input file.
    #[error("the lorenz series requires --path")]
    MissingPath,
    /// Reading the Lorenz input failed.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A line of the Lorenz input was not a number.
    #[error("`{path}` line {line}: `{value}` is not a number")]
    InvalidValue {
        /// File being read.
        path: PathBuf,
        /// One-based line number.
        line: usize,
        /// Offending text.
        value: String,
    },
    /// The series cannot fill a single delay vector.
    #[error("a series of {length} values cannot form vectors of dimension {embedding_dim}")]
    TooShort {
        /// Number of values available.
        length: usize,
        /// Requested embedding dimension.
        embedding_dim: usize,
    },
    /// The embedded vectors were rejected as a point set.
    #[error(transparent)]
    Points(#[from] DataSourceError),
}

/// Produces `length` values of `map`.
///
/// `path` is only consulted for [`ChaoticMap::Lorenz`], whose output is
/// truncated to `length` when the file holds more values.
///
/// # Errors
/// Returns [`SeriesError::MissingPath`] when the Lorenz series has no file,
/// and [`SeriesError::Io`] or [`SeriesError::InvalidValue`] when the file
/// cannot be read.
///
/// # Examples
/// ```
/// use wishart_cli::series::{ChaoticMap, generate};
///
/// let series = generate(ChaoticMap::Logistic, 3, None)?;
/// assert_eq!(series.len(), 3);
/// assert!((series[1] - 0.96).abs() < 1e-6);
/// # Ok::<(), wishart_cli::series::SeriesError>(())
/// ```
pub fn generate(map: ChaoticMap, length: usize, path: Option<&Path>) -> Result<Vec<f32>, SeriesError> {
    let values = match map {
        ChaoticMap::Logistic => iterate(LOGISTIC_X0, length, |x| LOGISTIC_R * x * (1.0 - x)),
        ChaoticMap::SkewTent => iterate(SKEW_TENT_X0, length, skew_tent),
        ChaoticMap::Schuster => iterate(SCHUSTER_X0, length, |x| (x + x.powf(SCHUSTER_Z)).fract()),
        ChaoticMap::Henon => henon(length),
        ChaoticMap::Lorenz => return read_series(path.ok_or(SeriesError::MissingPath)?, length),
    };
    Ok(values.into_iter().map(|value| value as f32).collect())
}

fn iterate(start: f64, length: usize, step: impl Fn(f64) -> f64) -> Vec<f64> {
    std::iter::successors(Some(start), |&x| Some(step(x)))
        .take(length)
        .collect()
}

fn skew_tent(x: f64) -> f64 {
    if x < SKEW_TENT_OMEGA {
        x / SKEW_TENT_OMEGA
    } else {
        (1.0 - x) / (1.0 - SKEW_TENT_OMEGA)
    }
}

fn henon(length: usize) -> Vec<f64> {
    std::iter::successors(Some((HENON_X0, HENON_Y0)), |&(x, y)| {
        Some((1.0 - HENON_A * x * x + y, HENON_B * x))
    })
    .map(|(x, _)| x)
    .take(length)
    .collect()
}

fn read_series(path: &Path, length: usize) -> Result<Vec<f32>, SeriesError> {
    let io_error = |source| SeriesError::Io {
        path: path.to_path_buf(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_error)?);
    let mut values = Vec::with_capacity(length);
    for (offset, line) in reader.lines().enumerate() {
        if values.len() == length {
            break;
        }
        let text = line.map_err(io_error)?;
        let trimmed = text.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = trimmed
            .parse::<f32>()
            .map_err(|_| SeriesError::InvalidValue {
                path: path.to_path_buf(),
                line: offset + 1,
                value: trimmed.to_owned(),
            })?;
        values.push(value);
    }
    Ok(values)
}

/// Turns `series` into overlapping vectors of `embedding_dim` consecutive
/// values, one per start position.
///
/// # Errors
/// Returns [`SeriesError::TooShort`] when `series` has fewer than
/// `embedding_dim` values (or `embedding_dim` is zero), and
/// [`SeriesError::Points`] when a value is not finite.
///
/// # Examples
/// ```
/// use wishart_cli::series::delay_embed;
/// use wishart_core::DataSource;
///
/// let points = delay_embed("demo", &[1.0, 2.0, 3.0, 4.0], 3)?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.point(1)?, &[2.0, 3.0, 4.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn delay_embed(
    name: &str,
    series: &[f32],
    embedding_dim: usize,
) -> Result<DenseVectors, SeriesError> {
    if embedding_dim == 0 || series.len() < embedding_dim {
        return Err(SeriesError::TooShort {
            length: series.len(),
            embedding_dim,
        });
    }
    let data: Vec<f32> = series
        .windows(embedding_dim)
        .flat_map(|window| window.iter().copied())
        .collect();
    Ok(DenseVectors::try_from_flat(name, embedding_dim, data)?)
}
