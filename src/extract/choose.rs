//! Table disambiguation: resolve the user's free-text selection over the
//! parsed tables and stack the chosen ones into a single result.

use tracing::debug;

use crate::extract::tables::Table;
use crate::extract::ResultSet;

/// Parsed form of the selection prompt's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Empty input: the first table only.
    First,
    /// Literal "all": every table, in original order.
    All,
    /// Comma-separated indices, invalid tokens already dropped. May be empty.
    Indices(Vec<usize>),
}

/// Parse the selection text.
///
/// A token survives only if it is all ASCII digits and indexes an existing
/// table; everything else is silently dropped. Zero surviving indices is a
/// valid, empty selection rather than an error.
pub fn parse_selection(input: &str, table_count: usize) -> Selection {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Selection::First;
    }
    if trimmed.eq_ignore_ascii_case("all") {
        return Selection::All;
    }

    let indices: Vec<usize> = trimmed
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<usize>().ok())
        .filter(|&index| index < table_count)
        .collect();
    debug!("selection {input:?} resolved to indices {indices:?}");
    Selection::Indices(indices)
}

/// Stack the selected tables' rows into one result set.
///
/// Columns are the union of the selected tables' headers in first-seen order;
/// a row's cells land under their source header and columns a source table
/// lacks become gaps. Heterogeneous stacking is best-effort, not a guarantee.
pub fn concat_selected(tables: &[Table], selection: &Selection) -> ResultSet {
    let picked: Vec<&Table> = match selection {
        Selection::First => tables.first().into_iter().collect(),
        Selection::All => tables.iter().collect(),
        Selection::Indices(indices) => {
            indices.iter().filter_map(|&i| tables.get(i)).collect()
        }
    };

    let mut columns: Vec<String> = Vec::new();
    for table in &picked {
        for header in &table.headers {
            if !columns.contains(header) {
                columns.push(header.clone());
            }
        }
    }

    let mut result = ResultSet::new(columns);
    for table in picked {
        let targets: Vec<Option<usize>> = table
            .headers
            .iter()
            .map(|header| result.columns.iter().position(|c| c == header))
            .collect();
        for row in &table.rows {
            let mut out = vec![None; result.columns.len()];
            for (cell, target) in row.iter().zip(&targets) {
                if let Some(index) = target {
                    out[*index] = Some(cell.clone());
                }
            }
            result.push_row(out);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_tables() -> Vec<Table> {
        (0..3)
            .map(|i| Table {
                headers: vec!["col".to_string()],
                rows: vec![vec![format!("t{i}")]],
            })
            .collect()
    }

    #[test]
    fn empty_input_selects_first_only() {
        let tables = three_tables();
        let result = concat_selected(&tables, &parse_selection("", tables.len()));
        assert_eq!(result.rows, vec![vec![Some("t0".to_string())]]);
    }

    #[test]
    fn all_selects_everything_in_order() {
        let tables = three_tables();
        let result = concat_selected(&tables, &parse_selection("ALL", tables.len()));
        assert_eq!(result.len(), 3);
        assert_eq!(result.rows[0][0].as_deref(), Some("t0"));
        assert_eq!(result.rows[2][0].as_deref(), Some("t2"));
    }

    #[test]
    fn index_list_selects_in_given_order() {
        let tables = three_tables();
        let result = concat_selected(&tables, &parse_selection("0, 2", tables.len()));
        assert_eq!(result.len(), 2);
        assert_eq!(result.rows[0][0].as_deref(), Some("t0"));
        assert_eq!(result.rows[1][0].as_deref(), Some("t2"));
    }

    #[test]
    fn out_of_range_and_junk_tokens_are_dropped() {
        assert_eq!(parse_selection("5", 3), Selection::Indices(vec![]));
        assert_eq!(parse_selection("1, x, -2, 1.5, 99", 3), Selection::Indices(vec![1]));
    }

    #[test]
    fn zero_valid_indices_yield_an_empty_result() {
        let tables = three_tables();
        let result = concat_selected(&tables, &parse_selection("5", tables.len()));
        assert!(result.is_empty());
    }

    // Heterogeneous stacking is best-effort only: union-by-name with gaps.
    #[test]
    fn mismatched_schemas_union_by_name_with_gaps() {
        let tables = vec![
            Table {
                headers: vec!["a".to_string(), "b".to_string()],
                rows: vec![vec!["1".to_string(), "2".to_string()]],
            },
            Table {
                headers: vec!["b".to_string(), "c".to_string()],
                rows: vec![vec!["3".to_string(), "4".to_string()]],
            },
        ];
        let result = concat_selected(&tables, &Selection::All);
        assert_eq!(result.columns, vec!["a", "b", "c"]);
        assert_eq!(
            result.rows[0],
            vec![Some("1".to_string()), Some("2".to_string()), None]
        );
        assert_eq!(
            result.rows[1],
            vec![None, Some("3".to_string()), Some("4".to_string())]
        );
    }
}
