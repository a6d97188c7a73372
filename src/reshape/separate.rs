//! Splitting one column into several

use rayon::prelude::*;

use crate::config::ArityPolicy;
use crate::error::{ReshapeError, Result};
use crate::model::{CellValue, Column, Row, Table};

/// How to split a cell's string value into pieces
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Split on every occurrence of a delimiter string
    Delimiter(String),
    /// Split at fixed character positions (ascending, 0-based)
    Positions(Vec<usize>),
}

impl SplitPolicy {
    fn split(&self, value: &str) -> Vec<String> {
        match self {
            SplitPolicy::Delimiter(delim) => {
                value.split(delim.as_str()).map(str::to_string).collect()
            }
            SplitPolicy::Positions(positions) => {
                let chars: Vec<char> = value.chars().collect();
                let mut pieces = Vec::with_capacity(positions.len() + 1);
                let mut start = 0;
                for &pos in positions {
                    let pos = pos.min(chars.len());
                    pieces.push(chars[start..pos.max(start)].iter().collect());
                    start = pos.max(start);
                }
                pieces.push(chars[start..].iter().collect());
                pieces
            }
        }
    }
}

/// Split `source_column` into the `into` columns, row by row.
///
/// Each row's cell is rendered to a string and split per `split`; the
/// resulting pieces fill the target columns in order and the source
/// column is replaced in place by them. A piece count that differs
/// from `into.len()` is a `SplitArityMismatch` by default; `arity`
/// can opt into padding short rows with missing values and/or
/// dropping extra pieces. A missing source cell yields all-missing
/// pieces under every policy.
pub fn separate(
    table: &Table,
    source_column: &str,
    into: &[String],
    split: &SplitPolicy,
    arity: ArityPolicy,
) -> Result<Table> {
    let source_idx =
        table
            .column_index(source_column)
            .ok_or_else(|| ReshapeError::ColumnNotFound {
                column: source_column.to_string(),
            })?;
    if into.is_empty() {
        return Err(ReshapeError::EmptySelection);
    }

    // Target names must not collide with each other or with the
    // columns that survive the split.
    for (i, name) in into.iter().enumerate() {
        if into[..i].contains(name) {
            return Err(ReshapeError::DuplicateColumn {
                column: name.clone(),
            });
        }
        if table
            .columns
            .iter()
            .enumerate()
            .any(|(i, c)| i != source_idx && c.name == *name)
        {
            return Err(ReshapeError::DuplicateColumn {
                column: name.clone(),
            });
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(table.column_count() + into.len() - 1);
    for (i, col) in table.columns.iter().enumerate() {
        if i == source_idx {
            for name in into {
                columns.push(Column::new(name.clone(), columns.len()));
            }
        } else {
            columns.push(col.carried(col.name.clone(), columns.len()));
        }
    }

    let expected = into.len();
    let rows: Vec<Row> = table
        .rows
        .par_iter()
        .map(|row| {
            let source = row.cells.get(source_idx).cloned().unwrap_or(CellValue::Null);
            let pieces = if source.is_null() {
                vec![CellValue::Null; expected]
            } else {
                fit_pieces(
                    split.split(&source.display()),
                    expected,
                    arity,
                    row.source_line,
                    source_column,
                )?
            };

            let mut cells = Vec::with_capacity(columns.len());
            for (i, cell) in row.cells.iter().enumerate() {
                if i == source_idx {
                    cells.extend(pieces.iter().cloned());
                } else {
                    cells.push(cell.clone());
                }
            }
            Ok(Row::new(cells, row.source_line))
        })
        .collect::<Result<_>>()?;

    let mut out = Table::new(columns);
    out.rows = rows;
    out.infer_column_types();
    Ok(out)
}

/// Reconcile the observed piece count with the expected arity
fn fit_pieces(
    pieces: Vec<String>,
    expected: usize,
    arity: ArityPolicy,
    line: usize,
    column: &str,
) -> Result<Vec<CellValue>> {
    let found = pieces.len();
    let mut cells: Vec<CellValue> = pieces.into_iter().map(CellValue::from).collect();

    if found < expected {
        match arity {
            ArityPolicy::Pad | ArityPolicy::PadTruncate => {
                cells.resize(expected, CellValue::Null);
            }
            _ => {
                return Err(ReshapeError::SplitArityMismatch {
                    line,
                    column: column.to_string(),
                    expected,
                    found,
                });
            }
        }
    } else if found > expected {
        match arity {
            ArityPolicy::Truncate | ArityPolicy::PadTruncate => {
                cells.truncate(expected);
            }
            _ => {
                return Err(ReshapeError::SplitArityMismatch {
                    line,
                    column: column.to_string(),
                    expected,
                    found,
                });
            }
        }
    }
    Ok(cells)
}
