//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use csv_view::host::{DocumentHost, HostError};
use csv_view::view_state::MemoryViewStateStore;
use csv_view::{CsvView, Msg, Session, ViewConfig, ViewError};

/// Host that records saves and errors instead of touching the disk
#[derive(Debug, Default)]
pub struct RecordingHost {
    pub saves: Vec<(Option<PathBuf>, String)>,
    pub errors: Vec<String>,
    /// Reject every save while set
    pub fail_saves: bool,
}

impl RecordingHost {
    pub fn last_save(&self) -> Option<&str> {
        self.saves.last().map(|(_, text)| text.as_str())
    }
}

impl DocumentHost for RecordingHost {
    fn save(&mut self, path: Option<&Path>, text: &str) -> Result<(), HostError> {
        if self.fail_saves {
            return Err(HostError::new("disk full"));
        }
        self.saves.push((path.map(Path::to_path_buf), text.to_string()));
        Ok(())
    }

    fn report_error(&mut self, error: &ViewError) {
        self.errors.push(error.to_string());
    }
}

pub type SharedStore = Rc<RefCell<MemoryViewStateStore>>;

pub fn config(has_headers: bool) -> ViewConfig {
    ViewConfig {
        default_has_headings: has_headers,
        ..ViewConfig::default()
    }
}

/// Session whose view uses `store` for header flags
pub fn session_with_store(config: ViewConfig, store: SharedStore) -> Session<RecordingHost> {
    Session::new(CsvView::new(config, Box::new(store)), RecordingHost::default())
}

/// Session with `text` opened from `path` and fully parsed
pub fn open_at(path: &str, text: &str, has_headers: bool) -> Session<RecordingHost> {
    let mut session = session_with_store(config(has_headers), SharedStore::default());
    session
        .dispatch(Msg::open(Some(PathBuf::from(path)), text))
        .unwrap();
    session.flush().unwrap();
    session
}

/// Session with `text` opened and fully parsed
pub fn loaded(text: &str, has_headers: bool) -> Session<RecordingHost> {
    open_at("/data/test.csv", text, has_headers)
}
