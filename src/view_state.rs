//! Persistent per-file view state
//!
//! Remembers UI choices for each CSV file (currently whether the first row
//! is a header) keyed by file path. The store is handed to the view when it
//! is constructed instead of living in a global settings blob.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::ViewError;

/// State remembered for one file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileViewState {
    pub has_headings: bool,
}

/// Keyed store of per-file view state
pub trait ViewStateStore {
    fn get(&self, path: &Path) -> Option<FileViewState>;
    fn set(&mut self, path: &Path, state: FileViewState) -> Result<(), ViewError>;
}

/// Several views can share one store
impl<S: ViewStateStore> ViewStateStore for Rc<RefCell<S>> {
    fn get(&self, path: &Path) -> Option<FileViewState> {
        self.borrow().get(path)
    }

    fn set(&mut self, path: &Path, state: FileViewState) -> Result<(), ViewError> {
        self.borrow_mut().set(path, state)
    }
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryViewStateStore {
    files: BTreeMap<PathBuf, FileViewState>,
}

impl MemoryViewStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl ViewStateStore for MemoryViewStateStore {
    fn get(&self, path: &Path) -> Option<FileViewState> {
        self.files.get(path).copied()
    }

    fn set(&mut self, path: &Path, state: FileViewState) -> Result<(), ViewError> {
        self.files.insert(path.to_path_buf(), state);
        Ok(())
    }
}

/// On-disk format of the JSON store
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ViewStateFile {
    /// Schema version for forward compatibility
    #[serde(default)]
    version: u32,
    #[serde(default)]
    files: BTreeMap<PathBuf, FileViewState>,
}

/// Store persisted as JSON, written through on every change
#[derive(Debug, Clone)]
pub struct JsonViewStateStore {
    path: PathBuf,
    state: ViewStateFile,
}

impl JsonViewStateStore {
    pub const CURRENT_VERSION: u32 = 1;

    /// Open the store at `path`
    ///
    /// A missing or unreadable file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let state = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid view state at {}: {}", path.display(), e);
                ViewStateFile::default()
            }),
            Err(_) => ViewStateFile::default(),
        };

        Self { path, state }
    }

    /// Open the store at the default location in the config directory
    pub fn open_default() -> Option<Self> {
        crate::config_paths::view_state_path().map(Self::open)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<(), ViewError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ViewError::Settings(format!("failed to create {}: {}", parent.display(), e))
            })?;
        }

        let file = ViewStateFile {
            version: Self::CURRENT_VERSION,
            files: self.state.files.clone(),
        };
        let contents =
            serde_json::to_string_pretty(&file).map_err(|e| ViewError::Settings(e.to_string()))?;
        std::fs::write(&self.path, contents).map_err(|e| {
            ViewError::Settings(format!("failed to write {}: {}", self.path.display(), e))
        })
    }
}

impl ViewStateStore for JsonViewStateStore {
    fn get(&self, path: &Path) -> Option<FileViewState> {
        self.state.files.get(path).copied()
    }

    fn set(&mut self, path: &Path, state: FileViewState) -> Result<(), ViewError> {
        if self.state.files.get(path) == Some(&state) {
            return Ok(());
        }
        self.state.files.insert(path.to_path_buf(), state);
        self.save()
    }
}
