//! CLI entry point for scoring clusterings and running baseline guessers.
//!
//! Parses command-line arguments with clap, executes the selected command,
//! renders the summary to stdout, and maps errors to a failing exit code.
//! Logging is initialised first so every later step can emit structured
//! diagnostics via `tracing`.

use std::io::{self, BufWriter, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use purity_cli::{
    cli::{Cli, CliError, render_summary, run_cli},
    logging::{self, LoggingError},
};
use tracing::{error, field};

fn try_main() -> Result<()> {
    let cli = Cli::parse();
    let summary = run_cli(cli).context("failed to execute command")?;
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    render_summary(&summary, &mut writer).context("failed to render summary")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}

/// Stable codes for the failure, when it came from the core library.
fn error_codes(err: &anyhow::Error) -> (Option<&'static str>, Option<&'static str>) {
    match err.downcast_ref::<CliError>() {
        Some(CliError::Metric(metric)) => (
            Some(metric.code().as_str()),
            metric.estimator_code().map(|code| code.as_str()),
        ),
        Some(CliError::Dataset(dataset)) => (Some(dataset.code().as_str()), None),
        Some(CliError::Strategy(strategy)) => (Some(strategy.code().as_str()), None),
        _ => (None, None),
    }
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        report_logging_init_error(&err);
        return ExitCode::FAILURE;
    }

    if let Err(err) = try_main() {
        let (code, estimator_code) = error_codes(&err);
        error!(
            error = %err,
            code = code.map(field::display),
            estimator_code = estimator_code.map(field::display),
            "command execution failed"
        );
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

#[expect(
    clippy::print_stderr,
    reason = "Emit one-off diagnostic before tracing is initialized"
)]
fn report_logging_init_error(err: &LoggingError) {
    eprintln!("failed to initialize logging: {err}");
}
