//! CSV table core
//!
//! Converts between raw delimited text and an editable table:
//! - Headerless parsing with BOM stripping and delimiter detection
//! - Header promotion/demotion and spreadsheet-style column labels
//! - Cell edits and row mutations keyed by stable row identity
//! - Serialization back to text in the file's own dialect
//!
//! # Architecture
//!
//! ```text
//! RawText ──codec::load──▶ Table ──grid──▶ ColumnDef + GridRow (widget)
//!    ▲                       │
//!    └────codec::serialize───┘
//! ```

mod codec;
pub mod grid;
mod label;
mod model;
pub mod render;

pub use codec::{detect_delimiter, load, parse, serialize, ParseError, ParseResult};
pub use grid::{column_defs, grid_rows, ColumnDef, GridRow, RowProjection, SortOrder};
pub use label::{column_index, column_label, synthesized_labels};
pub use model::{CellEdit, Delimiter, Dialect, LineEnding, Row, RowId, Table};
