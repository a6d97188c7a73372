//! Long-to-wide pivoting

use indexmap::{IndexMap, IndexSet};
use rustc_hash::FxBuildHasher;

use crate::config::DuplicatePolicy;
use crate::error::{ReshapeError, Result};
use crate::model::{CellValue, Column, ColumnSelector, GroupKeyBuilder, Table};

/// One id-group's accumulated state during the grouping pass
struct Group {
    first_line: usize,
    /// names_from value -> (one cell per values_from column, source line)
    entries: IndexMap<String, (Vec<CellValue>, usize), FxBuildHasher>,
}

/// Spread name/value pairs back out into wide columns.
///
/// Rows are grouped by the id columns (first-seen order preserved).
/// Each distinct value of `names_from` becomes an output column per
/// `values_from` column: named by the value alone when there is one
/// `values_from` column, `{values_column}_{value}` otherwise. A group
/// with no row for some name gets a missing cell; a group with more
/// than one row for a name is resolved by `policy`, which fails with
/// `DuplicateKey` by default.
pub fn pivot_wider(
    table: &Table,
    id_selector: &ColumnSelector,
    names_from: &str,
    values_from: &[String],
    policy: DuplicatePolicy,
) -> Result<Table> {
    let id_indices = id_selector.resolve(table)?;
    if id_indices.is_empty() {
        return Err(ReshapeError::EmptySelection);
    }
    let names_idx = table
        .column_index(names_from)
        .ok_or_else(|| ReshapeError::ColumnNotFound {
            column: names_from.to_string(),
        })?;
    if values_from.is_empty() {
        return Err(ReshapeError::EmptySelection);
    }
    let values_indices: Vec<usize> = values_from
        .iter()
        .map(|name| {
            table
                .column_index(name)
                .ok_or_else(|| ReshapeError::ColumnNotFound {
                    column: name.clone(),
                })
        })
        .collect::<Result<_>>()?;

    // Grouping pass: hash-map keyed by the id-cell tuple itself (never a
    // serialized string, so ids containing separator characters and missing
    // ids versus the literal "NA" stay distinct), with a nested map from
    // names_from value to the values_from cells.
    let key_builder = GroupKeyBuilder::new(id_indices.clone());
    let mut groups: IndexMap<Vec<CellValue>, Group, FxBuildHasher> = IndexMap::default();
    let mut name_order: IndexSet<String, FxBuildHasher> = IndexSet::default();

    for row in &table.rows {
        let key = key_builder.key_cells(&row.cells);
        let name = row
            .cells
            .get(names_idx)
            .cloned()
            .unwrap_or(CellValue::Null)
            .display()
            .into_owned();
        let values: Vec<CellValue> = values_indices
            .iter()
            .map(|&i| row.cells.get(i).cloned().unwrap_or(CellValue::Null))
            .collect();

        name_order.insert(name.clone());
        let group = groups.entry(key.clone()).or_insert_with(|| Group {
            first_line: row.source_line,
            entries: IndexMap::default(),
        });

        let existing_line = group.entries.get(&name).map(|(_, line)| *line);
        match existing_line {
            Some(first_line) => match policy {
                DuplicatePolicy::Error => {
                    return Err(ReshapeError::DuplicateKey {
                        key: GroupKeyBuilder::describe(&key),
                        name,
                        first_line,
                        second_line: row.source_line,
                    });
                }
                DuplicatePolicy::FirstWins => {}
                DuplicatePolicy::LastWins => {
                    group.entries.insert(name, (values, row.source_line));
                }
            },
            None => {
                group.entries.insert(name, (values, row.source_line));
            }
        }
    }

    // Output schema: id columns in selector order, then one column per
    // (names_from value, values_from column) in first-seen name order.
    let mut columns: Vec<Column> = Vec::new();
    let mut seen: IndexSet<String, FxBuildHasher> = IndexSet::default();
    for &idx in &id_indices {
        let src = &table.columns[idx];
        if !seen.insert(src.name.clone()) {
            return Err(ReshapeError::DuplicateColumn {
                column: src.name.clone(),
            });
        }
        columns.push(src.carried(src.name.clone(), columns.len()));
    }
    for name in &name_order {
        for value_col in values_from {
            let col_name = if values_from.len() == 1 {
                name.clone()
            } else {
                format!("{}_{}", value_col, name)
            };
            if !seen.insert(col_name.clone()) {
                return Err(ReshapeError::DuplicateColumn { column: col_name });
            }
            columns.push(Column::new(col_name, columns.len()));
        }
    }

    let mut out = Table::new(columns);
    for (key, group) in &groups {
        let mut cells = key.clone();
        for name in &name_order {
            match group.entries.get(name) {
                Some((values, _)) => cells.extend(values.iter().cloned()),
                None => {
                    cells.extend(std::iter::repeat(CellValue::Null).take(values_from.len()));
                }
            }
        }
        out.add_row(cells, group.first_line);
    }
    out.infer_column_types();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reshape::longer::pivot_longer;

    fn long_table() -> Table {
        let mut table = Table::with_names(&["id", "week", "rank"]);
        table.add_row(
            vec![CellValue::Int(1), CellValue::from("wk1"), CellValue::Int(10)],
            2,
        );
        table.add_row(
            vec![CellValue::Int(1), CellValue::from("wk2"), CellValue::Int(8)],
            3,
        );
        table.add_row(
            vec![CellValue::Int(2), CellValue::from("wk1"), CellValue::Int(5)],
            4,
        );
        table.infer_column_types();
        table
    }

    #[test]
    fn test_pivot_wider_basic() {
        let table = long_table();
        let wide = pivot_wider(
            &table,
            &ColumnSelector::names(&["id"]),
            "week",
            &["rank".to_string()],
            DuplicatePolicy::Error,
        )
        .unwrap();

        assert_eq!(wide.column_names(), vec!["id", "wk1", "wk2"]);
        assert_eq!(wide.row_count(), 2);
        assert_eq!(
            wide.rows[0].cells,
            vec![CellValue::Int(1), CellValue::Int(10), CellValue::Int(8)]
        );
        // id 2 has no wk2 row: the cell is missing
        assert_eq!(
            wide.rows[1].cells,
            vec![CellValue::Int(2), CellValue::Int(5), CellValue::Null]
        );
    }

    #[test]
    fn test_multiple_values_from_prefixes_names() {
        let mut table = Table::with_names(&["id", "week", "rank", "streams"]);
        table.add_row(
            vec![
                CellValue::Int(1),
                CellValue::from("wk1"),
                CellValue::Int(10),
                CellValue::Int(1000),
            ],
            2,
        );
        let wide = pivot_wider(
            &table,
            &ColumnSelector::names(&["id"]),
            "week",
            &["rank".to_string(), "streams".to_string()],
            DuplicatePolicy::Error,
        )
        .unwrap();
        assert_eq!(
            wide.column_names(),
            vec!["id", "rank_wk1", "streams_wk1"]
        );
    }

    #[test]
    fn test_duplicate_key_errors_by_default() {
        let mut table = long_table();
        table.add_row(
            vec![CellValue::Int(1), CellValue::from("wk1"), CellValue::Int(99)],
            5,
        );
        let err = pivot_wider(
            &table,
            &ColumnSelector::names(&["id"]),
            "week",
            &["rank".to_string()],
            DuplicatePolicy::Error,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReshapeError::DuplicateKey {
                key: "1".to_string(),
                name: "wk1".to_string(),
                first_line: 2,
                second_line: 5,
            }
        );
    }

    #[test]
    fn test_duplicate_key_first_and_last_wins() {
        let mut table = long_table();
        table.add_row(
            vec![CellValue::Int(1), CellValue::from("wk1"), CellValue::Int(99)],
            5,
        );

        let first = pivot_wider(
            &table,
            &ColumnSelector::names(&["id"]),
            "week",
            &["rank".to_string()],
            DuplicatePolicy::FirstWins,
        )
        .unwrap();
        assert_eq!(first.rows[0].cells[1], CellValue::Int(10));

        let last = pivot_wider(
            &table,
            &ColumnSelector::names(&["id"]),
            "week",
            &["rank".to_string()],
            DuplicatePolicy::LastWins,
        )
        .unwrap();
        assert_eq!(last.rows[0].cells[1], CellValue::Int(99));
    }

    #[test]
    fn test_longer_then_wider_round_trip() {
        let mut original = Table::with_names(&["id", "wk1", "wk2"]);
        original.add_row(
            vec![CellValue::Int(1), CellValue::Int(10), CellValue::Int(8)],
            2,
        );
        original.add_row(
            vec![CellValue::Int(2), CellValue::Int(5), CellValue::Null],
            3,
        );
        original.infer_column_types();

        let long = pivot_longer(
            &original,
            &ColumnSelector::names(&["wk1", "wk2"]),
            "name",
            "value",
        )
        .unwrap();
        let wide = pivot_wider(
            &long,
            &ColumnSelector::names(&["id"]),
            "name",
            &["value".to_string()],
            DuplicatePolicy::Error,
        )
        .unwrap();

        assert_eq!(wide.column_names(), original.column_names());
        assert_eq!(wide.rows, original.rows);
    }

    #[test]
    fn test_id_values_containing_separator_stay_distinct() {
        // ("x|y", "z") and ("x", "y|z") render to the same joined string
        // but are different id tuples and must form different groups
        let mut table = Table::with_names(&["a", "b", "week", "rank"]);
        table.add_row(
            vec![
                CellValue::from("x|y"),
                CellValue::from("z"),
                CellValue::from("wk1"),
                CellValue::Int(1),
            ],
            2,
        );
        table.add_row(
            vec![
                CellValue::from("x"),
                CellValue::from("y|z"),
                CellValue::from("wk1"),
                CellValue::Int(2),
            ],
            3,
        );
        let wide = pivot_wider(
            &table,
            &ColumnSelector::names(&["a", "b"]),
            "week",
            &["rank".to_string()],
            DuplicatePolicy::Error,
        )
        .unwrap();

        assert_eq!(wide.row_count(), 2);
        assert_eq!(
            wide.rows[0].cells,
            vec![
                CellValue::from("x|y"),
                CellValue::from("z"),
                CellValue::Int(1)
            ]
        );
        assert_eq!(
            wide.rows[1].cells,
            vec![
                CellValue::from("x"),
                CellValue::from("y|z"),
                CellValue::Int(2)
            ]
        );
    }

    #[test]
    fn test_missing_id_distinct_from_na_string() {
        let mut table = Table::with_names(&["id", "week", "rank"]);
        table.add_row(
            vec![CellValue::Null, CellValue::from("wk1"), CellValue::Int(1)],
            2,
        );
        table.add_row(
            vec![
                CellValue::from("NA"),
                CellValue::from("wk1"),
                CellValue::Int(2),
            ],
            3,
        );
        let wide = pivot_wider(
            &table,
            &ColumnSelector::names(&["id"]),
            "week",
            &["rank".to_string()],
            DuplicatePolicy::Error,
        )
        .unwrap();

        assert_eq!(wide.row_count(), 2);
        assert_eq!(wide.rows[0].cells[0], CellValue::Null);
        assert_eq!(wide.rows[1].cells[0], CellValue::from("NA"));
    }

    #[test]
    fn test_unknown_column_errors() {
        let table = long_table();
        let err = pivot_wider(
            &table,
            &ColumnSelector::names(&["id"]),
            "nope",
            &["rank".to_string()],
            DuplicatePolicy::Error,
        )
        .unwrap_err();
        assert_eq!(
            err,
            ReshapeError::ColumnNotFound {
                column: "nope".to_string()
            }
        );
    }
}
