//! datareshape - Reshape tabular data

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use datareshape::config::{ArityPolicy, Config, DuplicatePolicy, OutputFormat};
use datareshape::model::{ColumnSelector, Table};
use datareshape::reader::ReaderFactory;
use datareshape::reshape::{
    clean_names, drop_missing, pivot_longer, pivot_wider, separate, unite, SplitPolicy,
};
use datareshape::writer::{render_to_file, render_to_stdout};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliOutputFormat {
    Csv,
    Json,
    Table,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(f: CliOutputFormat) -> Self {
        match f {
            CliOutputFormat::Csv => OutputFormat::Csv,
            CliOutputFormat::Json => OutputFormat::Json,
            CliOutputFormat::Table => OutputFormat::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliDuplicatePolicy {
    Error,
    First,
    Last,
}

impl From<CliDuplicatePolicy> for DuplicatePolicy {
    fn from(p: CliDuplicatePolicy) -> Self {
        match p {
            CliDuplicatePolicy::Error => DuplicatePolicy::Error,
            CliDuplicatePolicy::First => DuplicatePolicy::FirstWins,
            CliDuplicatePolicy::Last => DuplicatePolicy::LastWins,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliArityPolicy {
    Error,
    Pad,
    Truncate,
    PadTruncate,
}

impl From<CliArityPolicy> for ArityPolicy {
    fn from(p: CliArityPolicy) -> Self {
        match p {
            CliArityPolicy::Error => ArityPolicy::Error,
            CliArityPolicy::Pad => ArityPolicy::Pad,
            CliArityPolicy::Truncate => ArityPolicy::Truncate,
            CliArityPolicy::PadTruncate => ArityPolicy::PadTruncate,
        }
    }
}

/// Reshape tabular data: pivot longer/wider, separate, unite, clean names
#[derive(Parser, Debug)]
#[command(name = "datareshape")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output file (stdout when omitted)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv", global = true)]
    format: CliOutputFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Collapse wide columns into name/value pairs
    PivotLonger {
        /// Input file (CSV or JSON)
        input: PathBuf,

        /// Columns to collapse (comma-separated)
        #[arg(long, value_delimiter = ',')]
        cols: Vec<String>,

        /// Collapse all columns whose name starts with this prefix
        #[arg(long, conflicts_with = "cols")]
        starts_with: Option<String>,

        /// Collapse all columns whose name ends with this suffix
        #[arg(long, conflicts_with_all = ["cols", "starts_with"])]
        ends_with: Option<String>,

        /// Collapse all columns whose name contains this substring
        #[arg(long, conflicts_with_all = ["cols", "starts_with", "ends_with"])]
        contains: Option<String>,

        /// Name for the new column holding collapsed column names
        #[arg(long, default_value = "name")]
        names_to: String,

        /// Name for the new column holding collapsed values
        #[arg(long, default_value = "value")]
        values_to: String,

        /// Drop output rows whose value is missing
        #[arg(long)]
        drop_missing: bool,
    },

    /// Spread name/value pairs out into wide columns
    PivotWider {
        /// Input file (CSV or JSON)
        input: PathBuf,

        /// Columns that jointly identify an output row (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        id: Vec<String>,

        /// Column whose distinct values become new column names
        #[arg(long)]
        names_from: String,

        /// Column(s) supplying the new cells (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        values_from: Vec<String>,

        /// What to do when two rows map to the same id/name pair
        #[arg(long, value_enum, default_value = "error")]
        on_duplicate: CliDuplicatePolicy,
    },

    /// Split one column into several
    Separate {
        /// Input file (CSV or JSON)
        input: PathBuf,

        /// Column to split
        #[arg(long)]
        column: String,

        /// Target column names, in order (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        into: Vec<String>,

        /// Delimiter to split on
        #[arg(long, default_value = "_")]
        delimiter: String,

        /// Split at fixed character positions instead (comma-separated)
        #[arg(long, value_delimiter = ',', conflicts_with = "delimiter")]
        at: Vec<usize>,

        /// What to do when a row yields the wrong number of pieces
        #[arg(long, value_enum, default_value = "error")]
        on_arity: CliArityPolicy,
    },

    /// Merge several columns into one
    Unite {
        /// Input file (CSV or JSON)
        input: PathBuf,

        /// Name for the merged column
        #[arg(long)]
        into: String,

        /// Columns to merge, in order (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Separator between merged values
        #[arg(long, default_value = "_")]
        separator: String,

        /// Skip missing values instead of rendering them as empty
        #[arg(long)]
        skip_missing: bool,
    },

    /// Normalize column names to snake_case identifiers
    CleanNames {
        /// Input file (CSV or JSON)
        input: PathBuf,
    },
}

impl Command {
    fn input(&self) -> &PathBuf {
        match self {
            Command::PivotLonger { input, .. }
            | Command::PivotWider { input, .. }
            | Command::Separate { input, .. }
            | Command::Unite { input, .. }
            | Command::CleanNames { input } => input,
        }
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config =
        Config::new(cli.command.input().clone()).with_output_format(cli.format.into());
    if let Some(path) = cli.output {
        config = config.with_output(path);
    }

    let factory = ReaderFactory::new();
    let table = factory
        .read(&config.input)
        .with_context(|| format!("Failed to read input file: {}", config.input.display()))?;

    let reshaped = apply(&cli.command, &table)?;

    match &config.output {
        Some(path) => render_to_file(&reshaped, path, config.output_format)?,
        None => render_to_stdout(&reshaped, config.output_format)?,
    }

    Ok(())
}

fn apply(command: &Command, table: &Table) -> Result<Table> {
    match command {
        Command::PivotLonger {
            cols,
            starts_with,
            ends_with,
            contains,
            names_to,
            values_to,
            drop_missing: drop_na,
            ..
        } => {
            let selector = if let Some(prefix) = starts_with {
                ColumnSelector::StartsWith(prefix.clone())
            } else if let Some(suffix) = ends_with {
                ColumnSelector::EndsWith(suffix.clone())
            } else if let Some(substr) = contains {
                ColumnSelector::Contains(substr.clone())
            } else {
                ColumnSelector::Names(cols.clone())
            };

            let long = pivot_longer(table, &selector, names_to, values_to)?;
            if *drop_na {
                Ok(drop_missing(&long, values_to)?)
            } else {
                Ok(long)
            }
        }
        Command::PivotWider {
            id,
            names_from,
            values_from,
            on_duplicate,
            ..
        } => Ok(pivot_wider(
            table,
            &ColumnSelector::Names(id.clone()),
            names_from,
            values_from,
            (*on_duplicate).into(),
        )?),
        Command::Separate {
            column,
            into,
            delimiter,
            at,
            on_arity,
            ..
        } => {
            let split = if at.is_empty() {
                SplitPolicy::Delimiter(delimiter.clone())
            } else {
                SplitPolicy::Positions(at.clone())
            };
            Ok(separate(table, column, into, &split, (*on_arity).into())?)
        }
        Command::Unite {
            into,
            columns,
            separator,
            skip_missing,
            ..
        } => Ok(unite(table, into, columns, separator, *skip_missing)?),
        Command::CleanNames { .. } => Ok(clean_names(table)),
    }
}
