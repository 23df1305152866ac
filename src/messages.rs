//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::path::PathBuf;

use crate::csv::RowId;
use crate::host::HostError;

/// Events reported by the grid widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridMsg {
    /// A cell was edited; `column` is the grid column id
    CellValueChanged {
        row: RowId,
        column: String,
        value: String,
    },
    /// Append an empty row
    AddRow,
    /// Insert an empty row at a table position
    InsertRow { index: usize },
    /// Delete a row
    RemoveRow(RowId),
    /// A column was dragged to a new position
    MoveColumn { from: usize, to: usize },
    /// The "file includes headers" toggle changed
    ToggleHeaders(bool),
}

/// Host document lifecycle messages
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentMsg {
    /// A file was opened in the view
    Open { path: Option<PathBuf>, text: String },
    /// New file contents (e.g. after an external change)
    SetViewData { text: String, clear: bool },
    /// The deferred parse for a load is due
    ParseTick { generation: u64 },
    /// A save request succeeded
    Saved,
    /// A save request was rejected by the host
    SaveFailed(HostError),
    /// Re-issue the last failed save
    RetrySave,
    /// Drop the view content
    Clear,
    /// The document was closed
    Close,
}

/// Top-level message type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Grid widget events
    Grid(GridMsg),
    /// Document lifecycle events
    Document(DocumentMsg),
}

// Convenience constructors for common messages
impl Msg {
    /// Open a file with its contents
    pub fn open(path: Option<PathBuf>, text: impl Into<String>) -> Self {
        Msg::Document(DocumentMsg::Open {
            path,
            text: text.into(),
        })
    }

    /// Edit a cell
    pub fn set_cell(row: RowId, column: impl Into<String>, value: impl Into<String>) -> Self {
        Msg::Grid(GridMsg::CellValueChanged {
            row,
            column: column.into(),
            value: value.into(),
        })
    }

    /// Toggle header interpretation
    pub fn toggle_headers(value: bool) -> Self {
        Msg::Grid(GridMsg::ToggleHeaders(value))
    }
}
