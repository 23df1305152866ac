//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ViewError;

/// Commands returned by update functions
#[derive(Debug, Default)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Re-render the grid from the current table
    Redraw,
    /// Ask the host to persist the document
    SaveFile {
        path: Option<PathBuf>,
        content: String,
    },
    /// Parse the pending load after `delay`
    /// Sends Msg::Document(ParseTick) when due
    DeferredParse { generation: u64, delay: Duration },
    /// Surface an error through the host
    ReportError(ViewError),
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }
}
