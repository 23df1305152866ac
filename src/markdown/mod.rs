//! Markdown cell rendering
//!
//! Cells may hold markdown; the grid draws them through a [`CellRenderer`]
//! backed by pulldown-cmark.
//!
//! [`CellRenderer`]: crate::host::CellRenderer

mod renderer;

pub use renderer::{cell_to_html, MarkdownRenderer};
