//! CSV table model types
//!
//! A [`Table`] holds column labels plus rows of fields. Every row carries a
//! [`RowId`] assigned when the row is created, so edits coming back from a
//! sorted or filtered grid always land on the right row.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::label::{column_label, synthesized_labels};
use crate::error::ViewError;

/// Supported CSV delimiters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    /// Get the character for this delimiter
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Delimiter implied by a file extension
    ///
    /// `csv` files are not forced to commas: spreadsheet exports in some
    /// locales use semicolons, so the caller should detect from content.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "tsv" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            _ => None,
        }
    }
}

/// Line terminator written between records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    #[default]
    Lf,
    Crlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
        }
    }

    /// Line ending used by the first line of `text` (LF when there is none)
    pub fn detect(text: &str) -> Self {
        match text.find('\n') {
            Some(i) if i > 0 && text.as_bytes()[i - 1] == b'\r' => LineEnding::Crlf,
            _ => LineEnding::Lf,
        }
    }
}

/// Surface formatting of the loaded text, reused when saving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dialect {
    pub delimiter: Delimiter,
    pub line_ending: LineEnding,
    /// Text ended with a line terminator after the last record
    pub trailing_newline: bool,
    /// Text started with U+FEFF
    pub bom: bool,
}

/// Stable identity of a row, independent of its visual position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RowId(u64);

impl RowId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A data row with its identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: RowId,
    pub fields: Vec<String>,
}

/// Represents a completed cell edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEdit {
    pub row: RowId,
    pub col: usize,
    pub old_value: String,
    pub new_value: String,
}

/// Editable table state
///
/// Invariant: every row has exactly `labels.len()` fields.
#[derive(Debug, Clone, Default)]
pub struct Table {
    labels: Vec<String>,
    /// Per column: the label came from the file's header row. Other labels
    /// are synthesized from the column position and never saved.
    declared: Vec<bool>,
    rows: Vec<Row>,
    has_headers: bool,
    dialect: Dialect,
    next_id: u64,
}

impl Table {
    /// Create an empty headerless table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from parsed records
    ///
    /// With `has_headers` the first record becomes the labels, otherwise
    /// labels are synthesized. The width is the widest of the header and the
    /// records; short rows are padded with empty fields and missing labels are
    /// synthesized from their position.
    pub fn from_records(records: Vec<Vec<String>>, has_headers: bool, dialect: Dialect) -> Self {
        let mut records = records.into_iter();
        let mut labels = if has_headers {
            records.next().unwrap_or_default()
        } else {
            Vec::new()
        };
        let data: Vec<Vec<String>> = records.collect();

        let width = data
            .iter()
            .map(Vec::len)
            .max()
            .unwrap_or(0)
            .max(labels.len());

        let mut declared = vec![true; labels.len()];
        declared.resize(width, false);
        labels.resize(width, String::new());

        let mut table = Self {
            labels,
            declared,
            rows: Vec::with_capacity(data.len()),
            has_headers,
            dialect,
            next_id: 0,
        };

        table.relabel();

        let mut padded = 0usize;
        for mut fields in data {
            if fields.len() < width {
                fields.resize(width, String::new());
                padded += 1;
            }
            let id = table.allocate_id();
            table.rows.push(Row { id, fields });
        }

        if padded > 0 {
            tracing::debug!("Padded {} short row(s) to {} columns", padded, width);
        }

        table
    }

    /// Reset every synthesized label to its position's letter
    fn relabel(&mut self) {
        for (col, (label, declared)) in self.labels.iter_mut().zip(&self.declared).enumerate() {
            if !declared {
                *label = column_label(col);
            }
        }
    }

    fn allocate_id(&mut self) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;
        id
    }

    // === Accessors ===

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    /// Whether a column's label came from the header row
    pub fn is_declared(&self, col: usize) -> bool {
        self.declared.get(col).copied().unwrap_or(false)
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn set_dialect(&mut self, dialect: Dialect) {
        self.dialect = dialect;
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ids of all rows in table order
    pub fn row_ids(&self) -> Vec<RowId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Current table position of a row
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|r| r.id == id)
    }

    /// Fields of a row
    pub fn row(&self, id: RowId) -> Option<&[String]> {
        self.rows
            .iter()
            .find(|r| r.id == id)
            .map(|r| r.fields.as_slice())
    }

    /// Id of the row at a table position
    pub fn row_id_at(&self, index: usize) -> Option<RowId> {
        self.rows.get(index).map(|r| r.id)
    }

    /// Cell value, `None` when the row or column does not exist
    pub fn get(&self, id: RowId, col: usize) -> Option<&str> {
        self.row(id)?.get(col).map(String::as_str)
    }

    /// Data rows as plain field vectors
    pub fn data(&self) -> Vec<Vec<String>> {
        self.rows.iter().map(|r| r.fields.clone()).collect()
    }

    /// Unique column identifiers
    ///
    /// A column's id is its label; an empty label falls back to the
    /// synthesized label, and repeats get a `_1`, `_2`, ... suffix.
    pub fn column_ids(&self) -> Vec<String> {
        let mut taken = HashSet::new();
        let mut ids = Vec::with_capacity(self.labels.len());

        for (col, label) in self.labels.iter().enumerate() {
            let base = if label.is_empty() {
                column_label(col)
            } else {
                label.clone()
            };
            let mut id = base.clone();
            let mut n = 0;
            while !taken.insert(id.clone()) {
                n += 1;
                id = format!("{}_{}", base, n);
            }
            ids.push(id);
        }

        ids
    }

    /// Resolve a column id (see [`Table::column_ids`]) to its index
    pub fn resolve_column(&self, column: &str) -> Option<usize> {
        self.column_ids().iter().position(|id| id == column)
    }

    // === Mutation ===

    /// Replace a cell value
    ///
    /// Returns `Ok(None)` when the value is unchanged.
    pub fn set_cell(
        &mut self,
        id: RowId,
        col: usize,
        value: &str,
    ) -> Result<Option<CellEdit>, ViewError> {
        let width = self.labels.len();
        let row = self
            .rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(ViewError::UnknownRow(id))?;
        let field = row
            .fields
            .get_mut(col)
            .ok_or(ViewError::ColumnOutOfRange { index: col, width })?;

        if field.as_str() == value {
            return Ok(None);
        }

        let old_value = std::mem::replace(field, value.to_string());
        Ok(Some(CellEdit {
            row: id,
            col,
            old_value,
            new_value: value.to_string(),
        }))
    }

    /// Append an empty row
    pub fn add_row(&mut self) -> RowId {
        self.insert_row(self.rows.len())
    }

    /// Insert an empty row at `index` (clamped to the row count)
    ///
    /// A table without columns gains one so the row can hold a value.
    pub fn insert_row(&mut self, index: usize) -> RowId {
        if self.labels.is_empty() {
            self.labels.push(column_label(0));
            self.declared.push(false);
        }
        let id = self.allocate_id();
        let fields = vec![String::new(); self.labels.len()];
        let index = index.min(self.rows.len());
        self.rows.insert(index, Row { id, fields });
        id
    }

    /// Remove a row by identity, returning its fields
    pub fn remove_row(&mut self, id: RowId) -> Result<Vec<String>, ViewError> {
        let index = self.position(id).ok_or(ViewError::UnknownRow(id))?;
        Ok(self.rows.remove(index).fields)
    }

    /// Move a column, reordering its label and every row's field
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<(), ViewError> {
        let width = self.labels.len();
        for index in [from, to] {
            if index >= width {
                return Err(ViewError::ColumnOutOfRange { index, width });
            }
        }
        if from == to {
            return Ok(());
        }

        let label = self.labels.remove(from);
        self.labels.insert(to, label);
        let declared = self.declared.remove(from);
        self.declared.insert(to, declared);
        for row in &mut self.rows {
            let field = row.fields.remove(from);
            row.fields.insert(to, field);
        }
        // Synthesized labels stay positional
        self.relabel();
        Ok(())
    }

    /// Switch between headerless and headered state
    ///
    /// Turning headers on promotes the first data row (table order) to labels.
    /// Turning them off demotes the header row to a new first data row, with
    /// `""` under synthesized labels, and synthesizes every label. Returns
    /// `false` when already in the requested state.
    pub fn set_has_headers(&mut self, has_headers: bool) -> bool {
        if self.has_headers == has_headers {
            return false;
        }

        let width = self.labels.len();
        if has_headers {
            if !self.rows.is_empty() {
                self.labels = self.rows.remove(0).fields;
                self.declared = vec![true; width];
            }
        } else if width > 0 {
            let id = self.allocate_id();
            let mut fields = std::mem::take(&mut self.labels);
            for (field, declared) in fields.iter_mut().zip(&self.declared) {
                if !declared {
                    field.clear();
                }
            }
            self.labels = synthesized_labels(width);
            self.declared = vec![false; width];
            self.rows.insert(0, Row { id, fields });
        }

        self.has_headers = has_headers;
        true
    }

    /// Header record to save: declared labels with `""` in place of
    /// synthesized ones, ending at the last declared label
    ///
    /// `None` when the table is headerless or declares no labels.
    pub fn header_record(&self) -> Option<Vec<String>> {
        if !self.has_headers {
            return None;
        }
        let end = self.declared.iter().rposition(|&d| d)? + 1;
        Some(
            self.labels[..end]
                .iter()
                .zip(&self.declared)
                .map(|(label, &declared)| if declared { label.clone() } else { String::new() })
                .collect(),
        )
    }
}
