//! Writer layer for emitting reshaped tables

mod csv;
mod json;
mod terminal;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::OutputFormat;
use crate::model::Table;

pub use self::csv::CsvWriter;
pub use self::json::JsonWriter;
pub use self::terminal::TerminalWriter;

/// Trait for table writers
pub trait TableWriter {
    /// Render a table to a writer
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()>;
}

/// Factory for creating writers by output format
pub struct WriterFactory;

impl WriterFactory {
    /// Create a writer for the given format
    pub fn create(format: OutputFormat) -> Box<dyn TableWriter> {
        match format {
            OutputFormat::Csv => Box::new(CsvWriter),
            OutputFormat::Json => Box::new(JsonWriter::new()),
            OutputFormat::Table => Box::new(TerminalWriter),
        }
    }
}

/// Render a table to stdout
pub fn render_to_stdout(table: &Table, format: OutputFormat) -> Result<()> {
    let writer = WriterFactory::create(format);
    let mut stdout = std::io::stdout();
    writer.write(table, &mut stdout)
}

/// Render a table to a file
pub fn render_to_file(table: &Table, path: &Path, format: OutputFormat) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let mut buffered = BufWriter::new(file);
    let writer = WriterFactory::create(format);
    writer.write(table, &mut buffered)?;
    buffered.flush()?;
    Ok(())
}
