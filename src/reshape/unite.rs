//! Merging several columns into one

use rayon::prelude::*;

use crate::error::{ReshapeError, Result};
use crate::model::{CellValue, Column, Row, Table};

/// Merge the `source_columns` into a single `target_column`, joining
/// each row's display strings with `separator`.
///
/// The united column takes the position of the leftmost source column
/// in table order; the source columns are removed. Values are joined
/// in the order the sources are listed. Missing inputs render as
/// empty strings so the piece positions stay recoverable by
/// `separate`; with `skip_missing` they are dropped along with their
/// separator instead (and a row whose inputs are all missing unites
/// to a missing cell). Unlike `separate` this can never hit an arity
/// mismatch.
pub fn unite(
    table: &Table,
    target_column: &str,
    source_columns: &[String],
    separator: &str,
    skip_missing: bool,
) -> Result<Table> {
    let source_indices: Vec<usize> = source_columns
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| ReshapeError::ColumnNotFound {
                    column: name.clone(),
                })
        })
        .collect::<Result<_>>()?;

    let mut is_source = vec![false; table.column_count()];
    for &idx in &source_indices {
        is_source[idx] = true;
    }
    // The target may reuse a source column's name (those columns are
    // removed) but not a surviving column's.
    if table
        .columns
        .iter()
        .enumerate()
        .any(|(i, c)| !is_source[i] && c.name == target_column)
    {
        return Err(ReshapeError::DuplicateColumn {
            column: target_column.to_string(),
        });
    }

    // The united column lands at the leftmost source position.
    let anchor = match source_indices.iter().min() {
        Some(&idx) => idx,
        None => return Err(ReshapeError::EmptySelection),
    };

    let mut columns: Vec<Column> = Vec::with_capacity(table.column_count());
    for (i, col) in table.columns.iter().enumerate() {
        if i == anchor {
            columns.push(Column::new(target_column, columns.len()));
        } else if !is_source[i] {
            columns.push(col.carried(col.name.clone(), columns.len()));
        }
    }

    let rows: Vec<Row> = table
        .rows
        .par_iter()
        .map(|row| {
            let mut parts: Vec<String> = Vec::with_capacity(source_indices.len());
            for &idx in &source_indices {
                match row.cells.get(idx) {
                    Some(CellValue::Null) | None => {
                        if !skip_missing {
                            parts.push(String::new());
                        }
                    }
                    Some(cell) => parts.push(cell.display().into_owned()),
                }
            }
            let united = if parts.is_empty() {
                CellValue::Null
            } else {
                CellValue::from(parts.join(separator))
            };

            let mut cells = Vec::with_capacity(columns.len());
            for (i, cell) in row.cells.iter().enumerate() {
                if i == anchor {
                    cells.push(united.clone());
                } else if !is_source[i] {
                    cells.push(cell.clone());
                }
            }
            Row::new(cells, row.source_line)
        })
        .collect();

    let mut out = Table::new(columns);
    out.rows = rows;
    out.infer_column_types();
    Ok(out)
}
