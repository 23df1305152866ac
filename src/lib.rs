//! CSV view - spreadsheet-style editing of delimited text files
//!
//! This crate provides the core of a CSV document view built on the Elm
//! Architecture pattern: grid and document events become [`Msg`]s, [`update`]
//! mutates the [`CsvView`] and returns [`Cmd`]s, and a [`Session`] carries
//! them out against the host.

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod csv;
pub mod error;
pub mod fs_watcher;
pub mod host;
pub mod markdown;
pub mod messages;
pub mod plugin;
pub mod runtime;
pub mod tracing;
pub mod update;
pub mod view;
pub mod view_state;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::ViewConfig;
pub use csv::Table;
pub use error::ViewError;
pub use messages::Msg;
pub use runtime::Session;
pub use update::update;
pub use view::CsvView;
