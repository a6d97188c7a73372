//! Wide-to-long pivoting

use rayon::prelude::*;

use crate::error::{ReshapeError, Result};
use crate::model::{CellValue, Column, ColumnSelector, Row, Table};

/// Collapse the selected "wide" columns into name/value pairs.
///
/// For every input row and every selected column, one output row is
/// emitted: the non-selected columns unchanged and in original order,
/// then `names_to` holding the selected column's name and `values_to`
/// holding its cell. With `n` rows and `k` selected columns the output
/// has exactly `n * k` rows.
///
/// Missing cells are preserved as missing; use [`drop_missing`] to
/// filter them afterwards if wanted.
pub fn pivot_longer(
    table: &Table,
    selector: &ColumnSelector,
    names_to: &str,
    values_to: &str,
) -> Result<Table> {
    let selected = selector.resolve(table)?;
    if selected.is_empty() {
        return Err(ReshapeError::EmptySelection);
    }

    let mut is_selected = vec![false; table.column_count()];
    for &idx in &selected {
        is_selected[idx] = true;
    }
    let kept: Vec<usize> = (0..table.column_count())
        .filter(|&i| !is_selected[i])
        .collect();

    if names_to == values_to {
        return Err(ReshapeError::DuplicateColumn {
            column: names_to.to_string(),
        });
    }
    for &idx in &kept {
        let name = &table.columns[idx].name;
        if name == names_to || name == values_to {
            return Err(ReshapeError::DuplicateColumn {
                column: name.clone(),
            });
        }
    }

    let mut columns: Vec<Column> = kept
        .iter()
        .enumerate()
        .map(|(out_idx, &src_idx)| {
            let src = &table.columns[src_idx];
            src.carried(src.name.clone(), out_idx)
        })
        .collect();
    columns.push(Column::new(names_to, kept.len()));
    columns.push(Column::new(values_to, kept.len() + 1));

    // Row expansion is independent per input row; partition across
    // threads and let the indexed collect keep input order.
    let selected_names: Vec<&str> = selected
        .iter()
        .map(|&i| table.columns[i].name.as_str())
        .collect();

    let rows: Vec<Row> = table
        .rows
        .par_iter()
        .flat_map_iter(|row| {
            let kept_cells: Vec<CellValue> = kept
                .iter()
                .map(|&i| row.cells.get(i).cloned().unwrap_or(CellValue::Null))
                .collect();
            selected
                .iter()
                .zip(&selected_names)
                .map(move |(&sel_idx, &sel_name)| {
                    let mut cells = kept_cells.clone();
                    cells.push(CellValue::from(sel_name));
                    cells.push(row.cells.get(sel_idx).cloned().unwrap_or(CellValue::Null));
                    Row::new(cells, row.source_line)
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let mut out = Table::new(columns);
    out.rows = rows;
    out.infer_column_types();
    Ok(out)
}

/// Remove rows whose cell in `column` is missing.
///
/// The optional post-filter after [`pivot_longer`]; kept separate so
/// the pivot itself never loses data.
pub fn drop_missing(table: &Table, column: &str) -> Result<Table> {
    let col_idx = table
        .column_index(column)
        .ok_or_else(|| ReshapeError::ColumnNotFound {
            column: column.to_string(),
        })?;

    let mut out = Table::new(table.columns.clone());
    out.rows = table
        .rows
        .iter()
        .filter(|row| !row.cells.get(col_idx).map_or(true, CellValue::is_null))
        .cloned()
        .collect();
    out.infer_column_types();
    Ok(out)
}
