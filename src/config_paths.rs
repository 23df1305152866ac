//! Centralized configuration paths for csv-view
//!
//! All config files live under:
//! - Unix/macOS: `~/.config/csv-view/`
//! - Windows: `%APPDATA%\csv-view\`
//!
//! This module is the single source of truth for config paths.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

const APP_DIR: &str = "csv-view";
const LOG_FILE: &str = "csv-view.log";

/// Base config directory for csv-view
///
/// Unix/macOS:
///   - If XDG_CONFIG_HOME is set: `$XDG_CONFIG_HOME/csv-view`
///   - Else: `~/.config/csv-view`
///
/// Windows:
///   - `%APPDATA%\csv-view`
pub fn config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        env::var("APPDATA")
            .ok()
            .map(|appdata| PathBuf::from(appdata).join(APP_DIR))
    }

    #[cfg(not(target_os = "windows"))]
    {
        env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|h| h.join(".config")))
            .map(|config| config.join(APP_DIR))
    }
}

/// `~/.config/csv-view/config.yaml`
pub fn config_file() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.yaml"))
}

/// `~/.config/csv-view/view-state.json`
pub fn view_state_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("view-state.json"))
}

/// `~/.config/csv-view/logs/`
pub fn logs_dir() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("logs"))
}

/// File name prefix of the rolling log
pub fn log_file_prefix() -> &'static str {
    LOG_FILE
}

fn ensure_dir(path: &Path) -> Result<(), String> {
    fs::create_dir_all(path)
        .map_err(|e| format!("Failed to create directory {}: {}", path.display(), e))
}

/// Ensure logs dir exists, returning it
pub fn ensure_logs_dir() -> Result<PathBuf, String> {
    let logs = logs_dir().ok_or_else(|| "No config directory available".to_string())?;
    ensure_dir(&logs)?;
    Ok(logs)
}
