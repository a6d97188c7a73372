//! Column name normalization

use rustc_hash::FxHashSet;

use crate::model::Table;

/// Normalize every column name to `[a-z][a-z0-9_]*` and make the set
/// unique.
///
/// Per name: lowercase, collapse each run of non-alphanumeric
/// characters to a single underscore, strip leading/trailing
/// underscores, and prefix `x` when the result would be empty or
/// start with a digit. Names that normalize to the same string are
/// disambiguated with `_2`, `_3`, ... suffixes (first occurrence keeps
/// the bare name). Idempotent; cell data is untouched.
pub fn clean_names(table: &Table) -> Table {
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let columns = table
        .columns
        .iter()
        .enumerate()
        .map(|(i, col)| {
            let base = normalize(&col.name);
            let unique = disambiguate(base, &mut seen);
            col.carried(unique, i)
        })
        .collect();

    let mut out = Table::new(columns);
    out.rows = table.rows.clone();
    out
}

/// Normalize a single name, without collision handling
fn normalize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('_') {
            out.push('_');
        }
    }
    while out.ends_with('_') {
        out.pop();
    }

    if out.is_empty() {
        out.push('x');
    } else if out.starts_with(|c: char| c.is_ascii_digit()) {
        out.insert(0, 'x');
    }
    out
}

fn disambiguate(base: String, seen: &mut FxHashSet<String>) -> String {
    if seen.insert(base.clone()) {
        return base;
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}_{}", base, n);
        if seen.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CellValue;

    #[test]
    fn test_normalize_spaces_and_case() {
        assert_eq!(normalize("Branch Name"), "branch_name");
        assert_eq!(normalize("  % Change (YoY)  "), "change_yoy");
        assert_eq!(normalize("a__b"), "a_b");
    }

    #[test]
    fn test_normalize_degenerate_names() {
        assert_eq!(normalize(""), "x");
        assert_eq!(normalize("!!!"), "x");
        assert_eq!(normalize("2021 Q1"), "x2021_q1");
    }

    #[test]
    fn test_duplicates_get_numeric_suffixes() {
        let table = Table::with_names(&["X", "X", "x"]);
        let cleaned = clean_names(&table);
        assert_eq!(cleaned.column_names(), vec!["x", "x_2", "x_3"]);
    }

    #[test]
    fn test_idempotent() {
        let table = Table::with_names(&["Branch Name", "branch name", "2021"]);
        let once = clean_names(&table);
        let twice = clean_names(&once);
        assert_eq!(once.column_names(), twice.column_names());
        assert_eq!(
            once.column_names(),
            vec!["branch_name", "branch_name_2", "x2021"]
        );
    }

    #[test]
    fn test_cells_untouched() {
        let mut table = Table::with_names(&["Branch Name"]);
        table.add_row(vec![CellValue::from("Midtown")], 2);
        let cleaned = clean_names(&table);
        assert_eq!(cleaned.rows, table.rows);
        assert_eq!(cleaned.column_names(), vec!["branch_name"]);
    }

    #[test]
    fn test_output_matches_identifier_pattern() {
        let table = Table::with_names(&["Crime Type", "% lo/hi", "9 lives", "___"]);
        let cleaned = clean_names(&table);
        for name in cleaned.column_names() {
            let mut chars = name.chars();
            assert!(chars.next().is_some_and(|c| c.is_ascii_lowercase()));
            assert!(chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        }
    }
}
