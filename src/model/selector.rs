//! Column selection: explicit name lists and name predicates

use crate::error::ReshapeError;

use super::table::Table;

/// Identifies a subset of a table's columns.
///
/// Predicate variants are evaluated once, at call time, against the
/// table's concrete column names; operations downstream only ever see
/// the resolved, ordered index list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSelector {
    /// Explicit names, in the given order. Unknown names are an error.
    Names(Vec<String>),
    /// All columns whose name starts with the prefix, in table order.
    StartsWith(String),
    /// All columns whose name ends with the suffix, in table order.
    EndsWith(String),
    /// All columns whose name contains the substring, in table order.
    Contains(String),
}

impl ColumnSelector {
    /// Convenience constructor from string slices
    pub fn names<S: AsRef<str>>(names: &[S]) -> Self {
        ColumnSelector::Names(names.iter().map(|s| s.as_ref().to_string()).collect())
    }

    /// Resolve the selector against a table into an ordered list of
    /// column indices.
    ///
    /// `Names` preserves the caller's order and fails with
    /// `ColumnNotFound` for any unknown name. Predicates match in
    /// table column order and may resolve to an empty list; whether
    /// that is an error is up to the operation.
    pub fn resolve(&self, table: &Table) -> Result<Vec<usize>, ReshapeError> {
        match self {
            ColumnSelector::Names(names) => names
                .iter()
                .map(|name| {
                    table
                        .column_index(name)
                        .ok_or_else(|| ReshapeError::ColumnNotFound {
                            column: name.clone(),
                        })
                })
                .collect(),
            ColumnSelector::StartsWith(prefix) => {
                Ok(Self::matching(table, |name| name.starts_with(prefix)))
            }
            ColumnSelector::EndsWith(suffix) => {
                Ok(Self::matching(table, |name| name.ends_with(suffix)))
            }
            ColumnSelector::Contains(substr) => {
                Ok(Self::matching(table, |name| name.contains(substr)))
            }
        }
    }

    fn matching(table: &Table, pred: impl Fn(&str) -> bool) -> Vec<usize> {
        table
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| pred(&c.name))
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::with_names(&["id", "wk1", "wk2", "week_total"])
    }

    #[test]
    fn test_names_preserve_order() {
        let table = sample();
        let sel = ColumnSelector::names(&["wk2", "wk1"]);
        assert_eq!(sel.resolve(&table).unwrap(), vec![2, 1]);
    }

    #[test]
    fn test_names_unknown_column() {
        let table = sample();
        let sel = ColumnSelector::names(&["wk3"]);
        assert_eq!(
            sel.resolve(&table),
            Err(ReshapeError::ColumnNotFound {
                column: "wk3".to_string()
            })
        );
    }

    #[test]
    fn test_starts_with_matches_in_table_order() {
        let table = sample();
        let sel = ColumnSelector::StartsWith("wk".to_string());
        assert_eq!(sel.resolve(&table).unwrap(), vec![1, 2]);
    }

    #[test]
    fn test_predicate_may_match_nothing() {
        let table = sample();
        let sel = ColumnSelector::EndsWith("xyz".to_string());
        assert_eq!(sel.resolve(&table).unwrap(), Vec::<usize>::new());
    }
}
