//! Seams between the view and the application hosting it
//!
//! The host owns persistence and error display; cell rich text is drawn
//! by an injected [`CellRenderer`].

use std::path::Path;

use thiserror::Error;

use crate::csv::render::escape_html;
use crate::error::ViewError;

/// Failure reported by the host's save mechanism
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Host document lifecycle callbacks used by the view
pub trait DocumentHost {
    /// Persist the document text
    fn save(&mut self, path: Option<&Path>, text: &str) -> Result<(), HostError>;

    /// Show an error to the user
    fn report_error(&mut self, error: &ViewError) {
        tracing::warn!("{}", error);
    }
}

/// Draws a cell's text into a target surface
pub trait CellRenderer {
    fn render(&self, text: &str, target: &mut String);
}

/// Renders cell text literally, escaped for an HTML surface
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainRenderer;

impl CellRenderer for PlainRenderer {
    fn render(&self, text: &str, target: &mut String) {
        target.push_str(&escape_html(text));
    }
}

/// Host that writes documents straight to the file system
#[derive(Debug, Clone, Default)]
pub struct FileHost {
    /// Number of successful saves
    pub saves: usize,
}

impl FileHost {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentHost for FileHost {
    fn save(&mut self, path: Option<&Path>, text: &str) -> Result<(), HostError> {
        let path = path.ok_or_else(|| HostError::new("document has no file path"))?;

        std::fs::write(path, text)
            .map_err(|e| HostError::new(format!("failed to write {}: {}", path.display(), e)))?;

        self.saves += 1;
        tracing::info!("Saved {} ({} bytes)", path.display(), text.len());
        Ok(())
    }

    fn report_error(&mut self, error: &ViewError) {
        tracing::error!("{}", error);
        eprintln!("error: {}", error);
    }
}
