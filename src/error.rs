//! Error types for the CSV view
//!
//! Nothing here is fatal: every error is scoped to a single open document.

use thiserror::Error;

use crate::csv::{ParseError, RowId};
use crate::host::HostError;

#[derive(Debug, Error)]
pub enum ViewError {
    /// A record could not be read; the rest of the table still loads
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A mutation arrived before the document finished loading
    #[error("document is not loaded")]
    NotLoaded,

    #[error("no row with id {0}")]
    UnknownRow(RowId),

    #[error("no column {0:?}")]
    UnknownColumn(String),

    #[error("column {index} out of range (table has {width} columns)")]
    ColumnOutOfRange { index: usize, width: usize },

    #[error("failed to serialize table: {0}")]
    Serialize(String),

    /// The host rejected a save; the in-memory table is kept for a retry
    #[error("failed to save document: {0}")]
    Persistence(#[from] HostError),

    #[error("view state: {0}")]
    Settings(String),
}
