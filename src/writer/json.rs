//! JSON output

use std::io::Write;

use anyhow::Result;

use crate::model::{CellValue, Table};

use super::TableWriter;

/// Writes a table as a JSON array of objects, one object per row.
/// Missing cells become JSON null.
pub struct JsonWriter {
    pretty: bool,
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl TableWriter for JsonWriter {
    fn write(&self, table: &Table, writer: &mut dyn Write) -> Result<()> {
        let rows: Vec<serde_json::Map<String, serde_json::Value>> = table
            .rows
            .iter()
            .map(|row| {
                table
                    .columns
                    .iter()
                    .zip(&row.cells)
                    .map(|(col, cell)| (col.name.clone(), cell_value_to_json(cell)))
                    .collect()
            })
            .collect();

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &rows)?;
        } else {
            serde_json::to_writer(&mut *writer, &rows)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

fn cell_value_to_json(value: &CellValue) -> serde_json::Value {
    match value {
        CellValue::Null => serde_json::Value::Null,
        CellValue::Bool(b) => serde_json::Value::Bool(*b),
        CellValue::Int(i) => serde_json::json!(*i),
        CellValue::Float(f) => serde_json::json!(*f),
        CellValue::String(s) => serde_json::Value::String(s.to_string()),
        CellValue::Date(d) => serde_json::Value::String(d.to_string()),
        CellValue::DateTime(dt) => serde_json::Value::String(dt.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_json_rows() {
        let mut table = Table::with_names(&["id", "rank"]);
        table.add_row(vec![CellValue::Int(1), CellValue::Null], 2);

        let mut buf = Vec::new();
        JsonWriter::compact().write(&table, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text.trim(), r#"[{"id":1,"rank":null}]"#);
    }
}
