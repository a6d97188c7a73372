//! Configuration handling for datareshape

use std::path::PathBuf;

/// Output format for reshaped tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Json,
    Table,
}

/// What pivot_wider does when more than one row maps to the same
/// (id-group, name) pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Fail with a DuplicateKey error naming both rows
    #[default]
    Error,
    /// Keep the first matching row's value
    FirstWins,
    /// Keep the last matching row's value
    LastWins,
}

/// What separate does when a row splits into the wrong number of pieces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArityPolicy {
    /// Fail with a SplitArityMismatch error naming the row
    #[default]
    Error,
    /// Too few pieces: pad trailing targets with missing. Too many still fail.
    Pad,
    /// Too many pieces: drop the extras. Too few still fail.
    Truncate,
    /// Pad when short, truncate when long; never fails on arity.
    PadTruncate,
}

/// Configuration for a reshape pipeline run
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Input file to reshape
    pub input: PathBuf,
    /// Output file; stdout when absent
    pub output: Option<PathBuf>,
    /// Output format
    pub output_format: OutputFormat,
}

impl Config {
    /// Create a new Config for an input file
    pub fn new(input: PathBuf) -> Self {
        Self {
            input,
            ..Default::default()
        }
    }

    /// Set the output file
    pub fn with_output(mut self, output: PathBuf) -> Self {
        self.output = Some(output);
        self
    }

    /// Set the output format
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }
}
