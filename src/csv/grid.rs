//! Grid widget adapter
//!
//! Turns a [`Table`] into the column definitions and row dataset a grid
//! widget consumes. The widget owns sorting and filtering; [`RowProjection`]
//! reproduces that ordering for hosts without one, and always hands out
//! [`RowId`]s rather than visual positions.

use std::cmp::Ordering;

use serde::Serialize;

use super::model::{RowId, Table};

/// Column definition handed to the grid widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDef {
    /// Unique column id; cell edits refer to columns by this id
    pub col_id: String,
    /// Text shown in the column header
    pub header_name: String,
    /// Position in the table
    pub index: usize,
    pub filter: bool,
    pub sortable: bool,
    pub resizable: bool,
    pub editable: bool,
    /// Rows can be dragged by this column's cells
    pub dnd_source: bool,
    /// Cells are rendered as markdown
    pub markdown: bool,
}

/// Row dataset entry handed to the grid widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GridRow {
    pub id: RowId,
    pub fields: Vec<String>,
}

/// Column definitions for every table column
pub fn column_defs(table: &Table, markdown: bool) -> Vec<ColumnDef> {
    table
        .column_ids()
        .into_iter()
        .zip(table.labels())
        .enumerate()
        .map(|(index, (col_id, label))| ColumnDef {
            col_id,
            header_name: label.clone(),
            index,
            filter: true,
            sortable: true,
            resizable: true,
            editable: true,
            dnd_source: index == 0,
            markdown,
        })
        .collect()
}

/// Row dataset in table order
pub fn grid_rows(table: &Table) -> Vec<GridRow> {
    table
        .rows()
        .iter()
        .map(|row| GridRow {
            id: row.id,
            fields: row.fields.clone(),
        })
        .collect()
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

/// Visual ordering of rows: optional filter, then optional stable sort
#[derive(Debug, Clone, Default)]
pub struct RowProjection {
    pub sort: Option<(usize, SortOrder)>,
    /// Keep rows whose cell in the column contains the text (case-insensitive)
    pub filter: Option<(usize, String)>,
}

impl RowProjection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sorted_by(mut self, col: usize, order: SortOrder) -> Self {
        self.sort = Some((col, order));
        self
    }

    pub fn filtered_by(mut self, col: usize, needle: impl Into<String>) -> Self {
        self.filter = Some((col, needle.into()));
        self
    }

    /// Row ids in display order
    pub fn apply(&self, table: &Table) -> Vec<RowId> {
        let mut rows: Vec<_> = table.rows().iter().collect();

        if let Some((col, needle)) = &self.filter {
            let needle = needle.to_lowercase();
            rows.retain(|row| {
                row.fields
                    .get(*col)
                    .is_some_and(|v| v.to_lowercase().contains(&needle))
            });
        }

        if let Some((col, order)) = self.sort {
            rows.sort_by(|a, b| {
                let ord = compare_cells(
                    a.fields.get(col).map_or("", String::as_str),
                    b.fields.get(col).map_or("", String::as_str),
                );
                match order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            });
        }

        rows.into_iter().map(|row| row.id).collect()
    }
}

/// Numeric comparison when both cells are numbers, text otherwise
fn compare_cells(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::load;

    #[test]
    fn test_column_defs() {
        let (table, _) = load("name,name\n1,2\n", true, None);
        let defs = column_defs(&table, true);

        assert_eq!(defs.len(), 2);
        assert_eq!(defs[0].col_id, "name");
        assert_eq!(defs[1].col_id, "name_1");
        assert_eq!(defs[1].header_name, "name");
        assert!(defs[0].dnd_source);
        assert!(!defs[1].dnd_source);
        assert!(defs.iter().all(|d| d.editable && d.sortable && d.filter && d.markdown));
    }

    #[test]
    fn test_grid_rows_carry_ids() {
        let (table, _) = load("a\nb\n", false, None);
        let rows = grid_rows(&table);

        assert_eq!(rows[0].id, table.row_id_at(0).unwrap());
        assert_eq!(rows[1].fields, vec!["b"]);
    }

    #[test]
    fn test_sort_numeric_and_text() {
        let (table, _) = load("10\n9\n100\n", false, None);
        let ids = RowProjection::new()
            .sorted_by(0, SortOrder::Ascending)
            .apply(&table);
        let values: Vec<&str> = ids.iter().map(|id| table.get(*id, 0).unwrap()).collect();
        assert_eq!(values, vec!["9", "10", "100"]);

        let (table, _) = load("b\na\nc\n", false, None);
        let ids = RowProjection::new()
            .sorted_by(0, SortOrder::Descending)
            .apply(&table);
        let values: Vec<&str> = ids.iter().map(|id| table.get(*id, 0).unwrap()).collect();
        assert_eq!(values, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_filter() {
        let (table, _) = load("Apple\nbanana\npineapple\n", false, None);
        let ids = RowProjection::new().filtered_by(0, "APPLE").apply(&table);

        assert_eq!(ids, vec![table.row_id_at(0).unwrap(), table.row_id_at(2).unwrap()]);
    }
}
