//! Command implementations and argument parsing for the purity CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use purity_core::{
    Categorical, Completeness, Dataset, DatasetError, FixedAssignments, Homogeneity, Labeled,
    Lottery, Metric, MetricError, PopularityContest, ScoreRange, StrategyError, VMeasure,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_DELIMITER: char = ',';
const DEFAULT_GUESS_COUNT: usize = 1;
const COMMENT_PREFIX: char = '#';

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "purity",
    about = "Score clusterings against ground truth and run baseline guessers."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Score cluster assignments read from a delimited file.
    Score(ScoreCommand),
    /// Fit a baseline strategy on the given values and print guesses.
    Guess(GuessCommand),
}

/// Options accepted by the `score` command.
#[derive(Debug, Args, Clone)]
pub struct ScoreCommand {
    /// Path to a file of `label<delimiter>cluster` lines.
    pub path: PathBuf,

    /// Metric used to score the assignments.
    #[arg(long, value_enum, default_value_t = MetricChoice::Homogeneity)]
    pub metric: MetricChoice,

    /// Character separating the label from the cluster on each line.
    #[arg(long, default_value_t = DEFAULT_DELIMITER)]
    pub delimiter: char,

    /// Override name for the dataset (defaults to the file name).
    #[arg(long)]
    pub name: Option<String>,
}

/// Metrics selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricChoice {
    /// Mean purity of each cluster with respect to the ground-truth classes.
    Homogeneity,
    /// Mean purity of each class with respect to the predicted clusters.
    Completeness,
    /// Harmonic mean of homogeneity and completeness.
    VMeasure,
}

/// Options accepted by the `guess` command.
#[derive(Debug, Args, Clone)]
pub struct GuessCommand {
    /// Observed values the strategy is fitted on.
    #[arg(required = true)]
    pub values: Vec<String>,

    /// Number of guesses to draw.
    #[arg(long, default_value_t = DEFAULT_GUESS_COUNT)]
    pub count: usize,

    /// Seed for reproducible guesses.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Baseline strategy to fit.
    #[arg(long, value_enum, default_value_t = StrategyChoice::Lottery)]
    pub strategy: StrategyChoice,
}

/// Baseline strategies selectable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyChoice {
    /// Guess uniformly among the distinct observed values.
    Lottery,
    /// Guess in proportion to how often each value was observed.
    Popularity,
}

impl StrategyChoice {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Lottery => "lottery",
            Self::Popularity => "popularity",
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// File I/O failed while loading an assignment file.
    #[error("failed to read `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// A non-comment line did not contain a label and a cluster.
    #[error("`{path}` line {line}: expected `label{delimiter}cluster`")]
    MalformedLine {
        /// File being parsed.
        path: PathBuf,
        /// One-based line number of the offending line.
        line: usize,
        /// Delimiter the line was split on.
        delimiter: char,
    },
    /// Dataset construction failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
    /// Metric evaluation failed.
    #[error(transparent)]
    Metric(#[from] MetricError),
    /// Baseline strategy failed.
    #[error(transparent)]
    Strategy(#[from] StrategyError),
}

/// Result of scoring an assignment file.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSummary {
    /// Name of the scored dataset.
    pub dataset: String,
    /// Name reported by the metric.
    pub metric: &'static str,
    /// Interval the score lies within.
    pub range: ScoreRange,
    /// Number of scored rows.
    pub samples: usize,
    /// Computed score.
    pub score: f64,
}

/// Guesses drawn from a fitted baseline strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessSummary {
    /// Strategy that produced the guesses.
    pub strategy: &'static str,
    /// Guesses in draw order.
    pub guesses: Vec<String>,
}

/// Summarises the outcome of executing a CLI command.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionSummary {
    /// Outcome of the `score` command.
    Score(ScoreSummary),
    /// Outcome of the `guess` command.
    Guess(GuessSummary),
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when parsing or execution fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use purity_cli::cli::{Cli, Command, ExecutionSummary, MetricChoice, ScoreCommand, run_cli};
/// # use tempfile::NamedTempFile;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let file = NamedTempFile::new()?;
/// std::fs::write(file.path(), "x,A\nx,A\ny,B\n")?;
/// let cli = Cli {
///     command: Command::Score(ScoreCommand {
///         path: file.path().to_path_buf(),
///         metric: MetricChoice::Homogeneity,
///         delimiter: ',',
///         name: None,
///     }),
/// };
/// let ExecutionSummary::Score(summary) = run_cli(cli)? else {
///     panic!("score command yields a score summary");
/// };
/// assert_eq!(summary.samples, 3);
/// assert!((summary.score - 1.0).abs() < 1e-6);
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Score(score) => {
            Span::current().record("command", field::display("score"));
            run_score(score).map(ExecutionSummary::Score)
        }
        Command::Guess(guess) => {
            Span::current().record("command", field::display("guess"));
            run_guess(guess).map(ExecutionSummary::Guess)
        }
    }
}

#[instrument(
    name = "cli.score",
    err,
    skip(command),
    fields(path = field::Empty, metric = field::Empty, override_name = field::Empty),
)]
pub(super) fn run_score(command: ScoreCommand) -> Result<ScoreSummary, CliError> {
    let ScoreCommand {
        path,
        metric,
        delimiter,
        name,
    } = command;
    let span = Span::current();
    span.record("path", field::display(path.display()));
    span.record(
        "override_name",
        field::display(name.as_deref().unwrap_or("<derived>")),
    );

    let reader = open_reader(&path)?;
    let (labels, clusters) = parse_assignments(&path, reader, delimiter)?;
    let dataset_name = derive_dataset_name(&path, name.as_deref());
    let rows = (0..labels.len()).collect();
    let testing = Labeled::new(dataset_name, rows, labels)?;
    let clusterer = FixedAssignments::new(clusters);

    let summary = match metric {
        MetricChoice::Homogeneity => score_with(&Homogeneity, &clusterer, &testing)?,
        MetricChoice::Completeness => score_with(&Completeness, &clusterer, &testing)?,
        MetricChoice::VMeasure => score_with(&VMeasure, &clusterer, &testing)?,
    };
    span.record("metric", field::display(summary.metric));
    info!(
        dataset = summary.dataset.as_str(),
        metric = summary.metric,
        score = summary.score,
        "score completed"
    );
    Ok(summary)
}

fn score_with<M: Metric>(
    metric: &M,
    clusterer: &FixedAssignments<String>,
    testing: &Labeled<usize, String>,
) -> Result<ScoreSummary, MetricError> {
    let score = metric.score(clusterer, testing)?;
    Ok(ScoreSummary {
        dataset: testing.name().to_owned(),
        metric: metric.name(),
        range: metric.range(),
        samples: clusterer.len(),
        score,
    })
}

#[instrument(
    name = "cli.guess",
    err,
    skip(command),
    fields(
        strategy = command.strategy.as_str(),
        values = command.values.len(),
        count = command.count,
        seeded = command.seed.is_some(),
    ),
)]
pub(super) fn run_guess(command: GuessCommand) -> Result<GuessSummary, CliError> {
    let GuessCommand {
        values,
        count,
        seed,
        strategy,
    } = command;
    let guesses = match seed {
        Some(seed) => guess_with(strategy, &values, count, &mut SmallRng::seed_from_u64(seed))?,
        None => guess_with(strategy, &values, count, &mut rand::thread_rng())?,
    };
    info!(guesses = guesses.len(), "guess completed");
    Ok(GuessSummary {
        strategy: strategy.as_str(),
        guesses,
    })
}

fn guess_with<R: Rng + ?Sized>(
    strategy: StrategyChoice,
    values: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, StrategyError> {
    match strategy {
        StrategyChoice::Lottery => draw_guesses(&mut Lottery::new(), values, count, rng),
        StrategyChoice::Popularity => {
            draw_guesses(&mut PopularityContest::new(), values, count, rng)
        }
    }
}

pub(super) fn draw_guesses<S, R>(
    strategy: &mut S,
    values: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, StrategyError>
where
    S: Categorical<String>,
    R: Rng + ?Sized,
{
    strategy.fit(values)?;
    (0..count).map(|_| strategy.guess(rng)).collect()
}

#[instrument(name = "cli.open_reader", err, fields(path = field::Empty))]
pub(super) fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    Span::current().record("path", field::display(path.display()));
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

/// Splits `label<delimiter>cluster` lines into parallel label and cluster
/// vectors. Blank lines and lines starting with `#` are skipped.
pub(super) fn parse_assignments(
    path: &Path,
    reader: impl BufRead,
    delimiter: char,
) -> Result<(Vec<String>, Vec<String>), CliError> {
    let mut labels = Vec::new();
    let mut clusters = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }
        let malformed = || CliError::MalformedLine {
            path: path.to_path_buf(),
            line: index + 1,
            delimiter,
        };
        let (label, cluster) = trimmed.split_once(delimiter).ok_or_else(malformed)?;
        let (label, cluster) = (label.trim(), cluster.trim());
        if label.is_empty() || cluster.is_empty() {
            return Err(malformed());
        }
        labels.push(label.to_owned());
        clusters.push(cluster.to_owned());
    }
    Ok((labels, clusters))
}

pub(super) fn derive_dataset_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }

    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "dataset".to_owned())
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use purity_cli::cli::{ExecutionSummary, GuessSummary, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary::Guess(GuessSummary {
///     strategy: "lottery",
///     guesses: vec!["spam".into(), "ham".into()],
/// });
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// assert_eq!(String::from_utf8(buffer.into_inner())?, "strategy: lottery\nspam\nham\n");
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    match summary {
        ExecutionSummary::Score(score) => {
            writeln!(writer, "dataset: {}", score.dataset)?;
            writeln!(writer, "samples: {}", score.samples)?;
            writeln!(
                writer,
                "{}: {:.6} (range {}..={})",
                score.metric,
                score.score,
                score.range.lower(),
                score.range.upper()
            )?;
        }
        ExecutionSummary::Guess(guess) => {
            writeln!(writer, "strategy: {}", guess.strategy)?;
            for value in &guess.guesses {
                writeln!(writer, "{value}")?;
            }
        }
    }
    Ok(())
}
