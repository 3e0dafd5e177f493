//! Entry point for the `wishart` binary.
//!
//! Logging is installed before anything else so failures while parsing input
//! or clustering are reported as structured events carrying stable codes.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, field};

use wishart_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let mut writer = BufWriter::new(io::stdout().lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    let Err(err) = try_main() else {
        return ExitCode::SUCCESS;
    };

    let core = err.downcast_ref::<CliError>().and_then(|cli_error| match cli_error {
        CliError::Core(core) => Some(core),
        _ => None,
    });
    let code = core.map(|core| field::display(core.code().as_str()));
    let data_source_code = core
        .and_then(|core| core.data_source_code())
        .map(|code| field::display(code.as_str()));

    error!(
        error = %format_args!("{err:#}"),
        code,
        data_source_code,
        "command execution failed"
    );
    ExitCode::FAILURE
}

#[expect(
    clippy::print_stderr,
    reason = "the subscriber is not installed yet"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialise logging: {err}");
}
