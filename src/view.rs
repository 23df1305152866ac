//! CSV document view
//!
//! Owns the table for one open document and mediates between the host's
//! document lifecycle, the codec and the grid widget. State changes return
//! plain results; [`crate::update`] turns them into commands.

use std::path::{Path, PathBuf};

use crate::config::ViewConfig;
use crate::csv::{self, ColumnDef, Delimiter, GridRow, ParseError, RowId, Table};
use crate::error::ViewError;
use crate::host::CellRenderer;
use crate::plugin;
use crate::view_state::{FileViewState, ViewStateStore};

/// Where the view is in its load lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
enum LoadState {
    /// Nothing loaded yet, or cleared
    Empty,
    /// Text received, parse deferred to the next tick
    Pending { text: String, generation: u64 },
    Loaded,
    Closed,
}

/// View controller for one CSV document
pub struct CsvView {
    path: Option<PathBuf>,
    table: Table,
    has_headers: bool,
    config: ViewConfig,
    store: Box<dyn ViewStateStore>,
    load: LoadState,
    /// Bumped on every load, clear and close; stale parse ticks are ignored
    generation: u64,
    /// An edit has not been confirmed saved by the host
    dirty: bool,
}

impl std::fmt::Debug for CsvView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CsvView")
            .field("path", &self.path)
            .field("has_headers", &self.has_headers)
            .field("rows", &self.table.row_count())
            .field("load", &self.load)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl CsvView {
    pub fn new(config: ViewConfig, store: Box<dyn ViewStateStore>) -> Self {
        Self {
            path: None,
            table: Table::new(),
            has_headers: config.default_has_headings,
            config,
            store,
            load: LoadState::Empty,
            generation: 0,
            dirty: false,
        }
    }

    // === Accessors ===

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn has_headers(&self) -> bool {
        self.has_headers
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Pending { .. })
    }

    pub fn is_loaded(&self) -> bool {
        self.load == LoadState::Loaded
    }

    pub fn is_closed(&self) -> bool {
        self.load == LoadState::Closed
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Title shown on the view's tab
    pub fn display_text(&self) -> String {
        plugin::display_text(self.path.as_deref())
    }

    // === Load lifecycle ===

    /// Attach a file to the view and start loading its text
    ///
    /// The header flag comes from the per-file store, falling back to the
    /// configured default. Returns the load generation.
    pub fn open(&mut self, path: Option<PathBuf>, text: String) -> u64 {
        self.has_headers = path
            .as_deref()
            .and_then(|p| self.store.get(p))
            .map(|state| state.has_headings)
            .unwrap_or(self.config.default_has_headings);
        tracing::debug!(
            "Opening {:?} (has_headers: {})",
            path.as_deref().map(Path::display),
            self.has_headers
        );
        self.path = path;
        self.begin_load(text)
    }

    /// Receive new text; parsing is deferred until [`CsvView::finish_load`]
    ///
    /// Any earlier pending load is superseded. Returns the load generation.
    pub fn begin_load(&mut self, text: String) -> u64 {
        self.generation += 1;
        let generation = self.generation;
        self.load = LoadState::Pending { text, generation };
        generation
    }

    /// Parse the pending text into a fresh table
    ///
    /// Returns `None` when `generation` is not the pending load (it was
    /// superseded, cleared or closed). Otherwise returns the per-record parse
    /// errors; the table holds every record that could be read.
    pub fn finish_load(&mut self, generation: u64) -> Option<Vec<ParseError>> {
        let text = match std::mem::replace(&mut self.load, LoadState::Loaded) {
            LoadState::Pending {
                text,
                generation: pending,
            } if pending == generation => text,
            other => {
                self.load = other;
                tracing::debug!("Ignoring stale parse tick (generation {})", generation);
                return None;
            }
        };

        let hint = self.delimiter_hint();
        let (mut table, errors) = csv::load(&text, self.has_headers, hint);

        let mut dialect = table.dialect();
        dialect.line_ending = self.config.line_ending.resolve(dialect.line_ending);
        table.set_dialect(dialect);

        tracing::debug!(
            "Loaded {} rows x {} columns ({} parse errors)",
            table.row_count(),
            table.column_count(),
            errors.len()
        );

        self.table = table;
        self.dirty = false;
        Some(errors)
    }

    fn delimiter_hint(&self) -> Option<Delimiter> {
        self.path
            .as_deref()
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
            .and_then(Delimiter::from_extension)
    }

    /// Drop the table and any pending load
    pub fn clear(&mut self) {
        self.generation += 1;
        self.table = Table::new();
        self.load = LoadState::Empty;
        self.dirty = false;
    }

    /// Close the document, cancelling a pending load
    pub fn close(&mut self) {
        if self.is_loading() {
            tracing::debug!("Cancelling pending load on close");
        }
        self.clear();
        self.load = LoadState::Closed;
    }

    // === Save ===

    /// Current document text
    pub fn view_data(&self) -> Result<String, ViewError> {
        csv::serialize(&self.table)
    }

    /// Mark the table as changed and produce the text to persist
    pub fn prepare_save(&mut self) -> Result<String, ViewError> {
        self.dirty = true;
        self.view_data()
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    // === Mutation ===

    fn ensure_loaded(&self) -> Result<(), ViewError> {
        if self.is_loaded() {
            Ok(())
        } else {
            Err(ViewError::NotLoaded)
        }
    }

    /// Edit a cell addressed by row identity and grid column id
    ///
    /// Returns `false` when the value did not change.
    pub fn set_cell(&mut self, row: RowId, column: &str, value: &str) -> Result<bool, ViewError> {
        self.ensure_loaded()?;
        let col = self
            .table
            .resolve_column(column)
            .ok_or_else(|| ViewError::UnknownColumn(column.to_string()))?;
        let edit = self.table.set_cell(row, col, value)?;
        if let Some(edit) = &edit {
            tracing::debug!(
                "Cell {}:{} {:?} -> {:?}",
                edit.row,
                column,
                edit.old_value,
                edit.new_value
            );
        }
        Ok(edit.is_some())
    }

    /// Append an empty row
    pub fn add_row(&mut self) -> Result<RowId, ViewError> {
        self.ensure_loaded()?;
        Ok(self.table.add_row())
    }

    /// Insert an empty row at a table position
    pub fn insert_row(&mut self, index: usize) -> Result<RowId, ViewError> {
        self.ensure_loaded()?;
        Ok(self.table.insert_row(index))
    }

    pub fn remove_row(&mut self, row: RowId) -> Result<(), ViewError> {
        self.ensure_loaded()?;
        self.table.remove_row(row)?;
        tracing::debug!("Removed row {}", row);
        Ok(())
    }

    /// Returns `false` when the column stays where it is
    pub fn move_column(&mut self, from: usize, to: usize) -> Result<bool, ViewError> {
        self.ensure_loaded()?;
        self.table.move_column(from, to)?;
        Ok(from != to)
    }

    /// Switch header interpretation and remember it for this file
    ///
    /// Returns `false` when already in the requested state.
    pub fn toggle_headers(&mut self, has_headers: bool) -> Result<bool, ViewError> {
        self.ensure_loaded()?;
        if !self.table.set_has_headers(has_headers) {
            return Ok(false);
        }
        self.has_headers = has_headers;
        tracing::debug!("Headers {}", if has_headers { "on" } else { "off" });
        Ok(true)
    }

    /// Record the header flag for the current file
    pub fn remember_headers(&mut self) -> Result<(), ViewError> {
        let Some(path) = self.path.as_deref() else {
            return Ok(());
        };
        self.store.set(
            path,
            FileViewState {
                has_headings: self.has_headers,
            },
        )
    }

    // === Grid ===

    pub fn column_defs(&self) -> Vec<ColumnDef> {
        csv::column_defs(&self.table, self.config.render_markdown)
    }

    pub fn grid_rows(&self) -> Vec<GridRow> {
        csv::grid_rows(&self.table)
    }

    /// Render one cell through the host's renderer
    pub fn render_cell(
        &self,
        row: RowId,
        col: usize,
        renderer: &dyn CellRenderer,
        target: &mut String,
    ) -> Result<(), ViewError> {
        let fields = self.table.row(row).ok_or(ViewError::UnknownRow(row))?;
        let value = fields.get(col).ok_or(ViewError::ColumnOutOfRange {
            index: col,
            width: self.table.column_count(),
        })?;
        renderer.render(value, target);
        Ok(())
    }
}
