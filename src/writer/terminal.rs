//! Aligned terminal preview

use std::io::Write;

use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;

use crate::model::Table;

use super::TableWriter;

/// Renders the table as an aligned grid for terminal inspection.
/// Missing cells show as "NA".
pub struct TerminalWriter;

impl TableWriter for TerminalWriter {
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut builder = Builder::default();
        builder.push_record(table.column_names());
        for row in &table.rows {
            builder.push_record(row.cells.iter().map(|c| c.display().into_owned()));
        }

        let mut grid = builder.build();
        grid.with(Style::sharp());
        writeln!(writer, "{}", grid)?;
        writeln!(writer, "{} rows x {} columns", table.row_count(), table.column_count())?;
        Ok(())
    }
}
