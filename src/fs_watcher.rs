//! File watching for external change reload
//!
//! Uses the `notify` crate with debouncing to detect when the open CSV file
//! is changed by another program. The parent directory is watched rather
//! than the file itself so replace-by-rename saves are still seen.

use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

/// Debounced watcher for a single file
pub struct FileWatcher {
    /// The debouncer handles watching and event coalescing
    _debouncer: Debouncer<notify::RecommendedWatcher>,
    /// Receiver for debounced events
    rx: Receiver<Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    /// File being watched
    path: PathBuf,
}

impl FileWatcher {
    /// Create a watcher for `path`
    ///
    /// Events are debounced with a 300ms delay to coalesce the bursts of
    /// writes a single save can produce.
    pub fn new(path: PathBuf) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let mut debouncer = new_debouncer(Duration::from_millis(300), tx)?;

        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        debouncer
            .watcher()
            .watch(&dir, notify::RecursiveMode::NonRecursive)?;

        tracing::info!("Watching {} for external changes", path.display());

        Ok(Self {
            _debouncer: debouncer,
            rx,
            path,
        })
    }

    /// The watched file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Poll for a change to the watched file (non-blocking)
    ///
    /// Drains all pending events and returns `true` if any concerned the file.
    pub fn poll_changed(&self) -> bool {
        let mut changed = false;

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(events) => {
                    changed |= events.iter().any(|event| {
                        !matches!(event.kind, DebouncedEventKind::AnyContinuous)
                            && self.is_watched(&event.path)
                    });
                }
                Err(e) => {
                    tracing::warn!("File watcher error: {:?}", e);
                }
            }
        }

        changed
    }

    /// Block until the file changes or `timeout` passes
    pub fn wait_changed(&self, timeout: Duration) -> bool {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(events)) => {
                let hit = events.iter().any(|event| {
                    !matches!(event.kind, DebouncedEventKind::AnyContinuous)
                        && self.is_watched(&event.path)
                });
                // Pick up anything queued behind the first batch.
                self.poll_changed() || hit
            }
            Ok(Err(e)) => {
                tracing::warn!("File watcher error: {:?}", e);
                false
            }
            Err(_) => false,
        }
    }

    fn is_watched(&self, path: &Path) -> bool {
        path.file_name().is_some() && path.file_name() == self.path.file_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_is_watched_matches_file_name_only() {
        let dir = tempdir().expect("Failed to create temp dir");
        let file = dir.path().join("data.csv");
        fs::write(&file, "a,b").unwrap();

        let Ok(watcher) = FileWatcher::new(file.clone()) else {
            return; // Skip if watcher can't be created
        };

        assert!(watcher.is_watched(&file));
        assert!(!watcher.is_watched(&dir.path().join("other.csv")));
        assert_eq!(watcher.path(), file.as_path());
    }
}
