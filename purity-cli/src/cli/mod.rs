//! Command-line interface orchestration for purity.
//!
//! The CLI scores cluster assignments read from delimited files and draws
//! guesses from the baseline categorical strategies.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, GuessCommand, GuessSummary, MetricChoice,
    ScoreCommand, ScoreSummary, StrategyChoice, render_summary, run_cli,
};

#[cfg(test)]
mod test_helpers;
