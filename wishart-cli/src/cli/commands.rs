//! Argument parsing and command execution for the `wishart` binary.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use thiserror::Error;
use tracing::{Span, field, info, instrument};
use wishart_core::{
    ClusterCenter, ClusteringResult, DataSource, DenseVectors, Wishart, WishartBuilder,
    WishartError,
};

use crate::delimited::{DelimitedError, read_points};
use crate::series::{ChaoticMap, SeriesError, delay_embed, generate};

const DEFAULT_WISHART_NEIGHBORS: usize = 5;
const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.05;
const DEFAULT_SERIES_LENGTH: usize = 1_000;
const DEFAULT_EMBEDDING_DIM: usize = 3;

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "wishart", about = "Cluster points with the Wishart density algorithm.")]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Cluster a point set and print one label per point.
    Run(RunCommand),
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Neighbours per point used to estimate local density.
    #[arg(long = "wishart-neighbors", default_value_t = DEFAULT_WISHART_NEIGHBORS)]
    pub wishart_neighbors: usize,

    /// Score a cluster must reach to count as significant.
    #[arg(long = "significance-level", default_value_t = DEFAULT_SIGNIFICANCE_LEVEL)]
    pub significance_level: f64,

    /// Also print the center of every cluster.
    #[arg(long)]
    pub centers: bool,

    /// Point source.
    #[command(subcommand)]
    pub source: RunSource,
}

/// Point sources understood by `run`.
#[derive(Debug, Subcommand, Clone)]
pub enum RunSource {
    /// Read points from a delimited text file, one point per line.
    Csv(CsvArgs),
    /// Generate a chaotic series and cluster its delay vectors.
    Series(SeriesArgs),
}

/// Delimited file arguments.
#[derive(Debug, Args, Clone)]
pub struct CsvArgs {
    /// File holding one point per line.
    pub path: PathBuf,

    /// Field separator.
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Override name for the data source (defaults to the file stem).
    #[arg(long)]
    pub name: Option<String>,
}

/// Chaotic series arguments.
#[derive(Debug, Args, Clone)]
pub struct SeriesArgs {
    /// Map generating the series.
    #[arg(value_enum)]
    pub map: ChaoticMap,

    /// Number of series values to produce.
    #[arg(long, default_value_t = DEFAULT_SERIES_LENGTH)]
    pub length: usize,

    /// Consecutive values per delay vector.
    #[arg(long = "embedding-dim", default_value_t = DEFAULT_EMBEDDING_DIM)]
    pub embedding_dim: usize,

    /// Series file, one value per line (required for `lorenz`).
    #[arg(long)]
    pub path: Option<PathBuf>,
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Opening an input file failed.
    #[error("failed to open `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Delimited ingestion failed.
    #[error(transparent)]
    Delimited(#[from] DelimitedError),
    /// Series generation or embedding failed.
    #[error(transparent)]
    Series(#[from] SeriesError),
    /// Clustering failed.
    #[error(transparent)]
    Core(#[from] WishartError),
}

/// Outcome of a CLI command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Name reported by the data source.
    pub data_source: String,
    /// Labels for every point.
    pub result: ClusteringResult,
    /// Cluster centers, empty unless requested.
    pub centers: Vec<ClusterCenter>,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when loading the input or clustering fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use wishart_cli::cli::{Cli, Command, CsvArgs, RunCommand, RunSource, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "0\n1\n2\n10\n11\n12\n")?;
/// let cli = Cli {
///     command: Command::Run(RunCommand {
///         wishart_neighbors: 1,
///         significance_level: 0.05,
///         centers: false,
///         source: RunSource::Csv(CsvArgs {
///             path: file.path().to_path_buf(),
///             delimiter: ',',
///             name: None,
///         }),
///     }),
/// };
/// let summary = run_cli(cli)?;
/// assert_eq!(summary.result.assignments().len(), 6);
/// # Ok(())
/// # }
/// ```
#[instrument(name = "cli.run", err, skip(cli), fields(command = field::Empty))]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(
        wishart_neighbors = command.wishart_neighbors,
        significance_level = command.significance_level,
        source = field::Empty,
    ),
)]
pub(super) fn run_command(command: RunCommand) -> Result<ExecutionSummary, CliError> {
    let wishart = WishartBuilder::new()
        .with_wishart_neighbors(command.wishart_neighbors)
        .with_significance_level(command.significance_level)
        .build()?;

    let span = Span::current();
    let points = match command.source {
        RunSource::Csv(args) => {
            span.record("source", field::display("csv"));
            load_csv(args)?
        }
        RunSource::Series(args) => {
            span.record("source", field::display("series"));
            load_series(args)?
        }
    };

    let summary = cluster(&wishart, &points, command.centers)?;
    info!(
        data_source = summary.data_source.as_str(),
        clusters = summary.result.cluster_count(),
        noise = summary.result.noise_count(),
        "command completed"
    );
    Ok(summary)
}

fn cluster(
    wishart: &Wishart,
    points: &DenseVectors,
    with_centers: bool,
) -> Result<ExecutionSummary, CliError> {
    let result = wishart.run(points)?;
    let centers = if with_centers {
        wishart.find_centers(points, &result)?
    } else {
        Vec::new()
    };
    Ok(ExecutionSummary {
        data_source: points.name().to_owned(),
        result,
        centers,
    })
}

#[instrument(
    name = "cli.load_csv",
    err,
    skip(args),
    fields(path = %args.path.display(), delimiter = ?args.delimiter),
)]
pub(super) fn load_csv(args: CsvArgs) -> Result<DenseVectors, CliError> {
    let CsvArgs {
        path,
        delimiter,
        name,
    } = args;
    let file = File::open(&path).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    let chosen_name = derive_data_source_name(&path, name.as_deref());
    Ok(read_points(&chosen_name, BufReader::new(file), delimiter)?)
}

#[instrument(
    name = "cli.load_series",
    err,
    skip(args),
    fields(map = args.map.as_str(), length = args.length, embedding_dim = args.embedding_dim),
)]
pub(super) fn load_series(args: SeriesArgs) -> Result<DenseVectors, CliError> {
    let series = generate(args.map, args.length, args.path.as_deref())?;
    Ok(delay_embed(args.map.as_str(), &series, args.embedding_dim)?)
}

pub(super) fn derive_data_source_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map_or_else(|| "data_source".to_owned(), ToOwned::to_owned)
}

/// Renders `summary` to `writer` as tab-separated text.
///
/// The header lists the data source, cluster count and noise count. One
/// `index<TAB>label` line per point follows, then one
/// `center<TAB>cluster<TAB>index<TAB>coords` line per requested center with
/// comma-separated coordinates.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use wishart_cli::cli::{ExecutionSummary, render_summary};
/// # use wishart_core::{ClusterCenter, ClusterId, ClusteringResult};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     data_source: "demo".into(),
///     result: ClusteringResult::from_raw_labels(&[ClusterId::new(1), ClusterId::NOISE]),
///     centers: vec![ClusterCenter {
///         cluster: ClusterId::new(1),
///         index: 0,
///         position: vec![0.5, 2.0],
///     }],
/// };
/// let mut buffer = Vec::new();
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(
///     String::from_utf8(buffer)?,
///     "data source: demo\nclusters: 1\nnoise: 1\n0\t1\n1\t0\ncenter\t1\t0\t0.5,2\n",
/// );
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    writeln!(writer, "data source: {}", summary.data_source)?;
    writeln!(writer, "clusters: {}", summary.result.cluster_count())?;
    writeln!(writer, "noise: {}", summary.result.noise_count())?;
    for (index, cluster) in summary.result.assignments().iter().enumerate() {
        writeln!(writer, "{index}\t{cluster}")?;
    }
    for center in &summary.centers {
        let coords: Vec<String> = center.position.iter().map(f32::to_string).collect();
        writeln!(
            writer,
            "center\t{}\t{}\t{}",
            center.cluster,
            center.index,
            coords.join(",")
        )?;
    }
    Ok(())
}
