//! View configuration persistence
//!
//! Stores user preferences in `~/.config/csv-view/config.yaml`

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::csv::LineEnding;

/// Line ending used when saving
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingPreference {
    /// Keep whatever the file used
    #[default]
    Auto,
    Lf,
    Crlf,
}

impl LineEndingPreference {
    /// Line ending to save with, given the one detected on load
    pub fn resolve(self, detected: LineEnding) -> LineEnding {
        match self {
            LineEndingPreference::Auto => detected,
            LineEndingPreference::Lf => LineEnding::Lf,
            LineEndingPreference::Crlf => LineEnding::Crlf,
        }
    }
}

/// View configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Treat the first row as headers for files with no remembered state
    #[serde(default)]
    pub default_has_headings: bool,
    /// Delay before parsing so a loading indicator can paint
    #[serde(default = "default_parse_delay_ms")]
    pub parse_delay_ms: u64,
    /// Render cell text as markdown
    #[serde(default = "default_render_markdown")]
    pub render_markdown: bool,
    #[serde(default)]
    pub line_ending: LineEndingPreference,
}

fn default_parse_delay_ms() -> u64 {
    50
}

fn default_render_markdown() -> bool {
    true
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_has_headings: false,
            parse_delay_ms: default_parse_delay_ms(),
            render_markdown: default_render_markdown(),
            line_ending: LineEndingPreference::default(),
        }
    }
}

impl ViewConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to a file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    pub fn parse_delay(&self) -> Duration {
        Duration::from_millis(self.parse_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewConfig::default();
        assert!(!config.default_has_headings);
        assert_eq!(config.parse_delay(), Duration::from_millis(50));
        assert!(config.render_markdown);
        assert_eq!(config.line_ending, LineEndingPreference::Auto);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: ViewConfig = serde_yaml::from_str("default_has_headings: true\n").unwrap();
        assert!(config.default_has_headings);
        assert_eq!(config.parse_delay_ms, 50);
        assert!(config.render_markdown);
    }

    #[test]
    fn test_line_ending_from_yaml() {
        let config: ViewConfig = serde_yaml::from_str("line_ending: crlf\n").unwrap();
        assert_eq!(config.line_ending.resolve(LineEnding::Lf), LineEnding::Crlf);
        assert_eq!(
            LineEndingPreference::Auto.resolve(LineEnding::Crlf),
            LineEnding::Crlf
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let config = ViewConfig {
            default_has_headings: true,
            parse_delay_ms: 0,
            render_markdown: false,
            line_ending: LineEndingPreference::Lf,
        };

        config.save_to(&path).unwrap();
        assert_eq!(ViewConfig::load_from(&path), config);
    }

    #[test]
    fn test_invalid_yaml_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "parse_delay_ms: [not, a, number]").unwrap();

        assert_eq!(ViewConfig::load_from(&path), ViewConfig::default());
    }
}
