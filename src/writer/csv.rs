//! CSV output

use std::io::Write;

use anyhow::Result;

use crate::model::{CellValue, Table};

use super::TableWriter;

/// Writes a table as CSV with a header row.
///
/// Missing cells are written as empty fields, which the CSV reader
/// maps back to missing on load.
pub struct CsvWriter;

impl TableWriter for CsvWriter {
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record(table.column_names())?;

        for row in &table.rows {
            let record: Vec<String> = row
                .cells
                .iter()
                .map(|cell| match cell {
                    CellValue::Null => String::new(),
                    other => other.display().into_owned(),
                })
                .collect();
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_csv_with_missing_cells() {
        let mut table = Table::with_names(&["id", "week", "rank"]);
        table.add_row(
            vec![CellValue::Int(1), CellValue::from("wk1"), CellValue::Int(10)],
            2,
        );
        table.add_row(
            vec![CellValue::Int(1), CellValue::from("wk2"), CellValue::Null],
            3,
        );

        let mut buf = Vec::new();
        CsvWriter.write(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "id,week,rank\n1,wk1,10\n1,wk2,\n");
    }
}
