//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions. Each discrete
//! user action that changes the table yields exactly one save request.

mod document;
mod grid;

use crate::commands::Cmd;
use crate::error::ViewError;
use crate::messages::Msg;
use crate::view::CsvView;

pub use document::update_document;
pub use grid::update_grid;

/// Main update function - dispatches to sub-handlers
pub fn update(view: &mut CsvView, msg: Msg) -> Option<Cmd> {
    tracing::trace!(?msg, "update");
    match msg {
        Msg::Grid(m) => update_grid(view, m),
        Msg::Document(m) => update_document(view, m),
    }
}

/// Save request for the current table, or the error that prevented it
pub(crate) fn save_cmd(view: &mut CsvView) -> Cmd {
    match view.prepare_save() {
        Ok(content) => Cmd::SaveFile {
            path: view.path().map(|p| p.to_path_buf()),
            content,
        },
        Err(e) => Cmd::ReportError(e),
    }
}

/// Report a failed action without touching the table
pub(crate) fn report(error: ViewError) -> Option<Cmd> {
    tracing::warn!("{}", error);
    Some(Cmd::ReportError(error))
}
