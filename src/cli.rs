//! Command-line argument parsing
//!
//! Supports:
//! - Opening a CSV file with or without a header row
//! - Cell edits, row insertion/deletion and column moves (each saved)
//! - Sorted/filtered output as a text table, CSV, HTML or grid JSON
//! - Watch mode that reloads on external changes

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::csv::SortOrder;

/// Open a CSV file as a table, edit it and write it back
#[derive(Parser, Debug)]
#[command(name = "csv-view", version, about = "Spreadsheet-style CSV viewer and editor")]
pub struct CliArgs {
    /// CSV file to open
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Treat the first row as column headers (remembered per file)
    #[arg(long, conflicts_with = "no_headers")]
    pub headers: bool,

    /// Treat the first row as data (remembered per file)
    #[arg(long)]
    pub no_headers: bool,

    /// Set a cell; ROW is the 1-based data row, COL a column label
    #[arg(long = "set", value_name = "ROW:COL=VALUE", value_parser = parse_cell_assignment)]
    pub set: Vec<CellAssignment>,

    /// Append an empty row
    #[arg(long)]
    pub add_row: bool,

    /// Delete a 1-based data row (as numbered when the file was opened)
    #[arg(long = "delete-row", value_name = "ROW")]
    pub delete_rows: Vec<usize>,

    /// Move a column; positions are 1-based
    #[arg(long, value_name = "FROM:TO", value_parser = parse_column_move)]
    pub move_column: Option<(usize, usize)>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Sort output by a column label
    #[arg(long, value_name = "COL")]
    pub sort: Option<String>,

    /// Sort descending (with --sort)
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Only show rows whose COL contains TEXT
    #[arg(long, value_name = "COL=TEXT", value_parser = parse_filter)]
    pub filter: Option<(String, String)>,

    /// Keep running and reload when the file changes
    #[arg(short = 'w', long)]
    pub watch: bool,

    /// Config file (defaults to ~/.config/csv-view/config.yaml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

/// How the table is printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text table
    Table,
    /// The document text as saved
    Csv,
    /// HTML table with markdown cells
    Html,
    /// Grid column definitions and row dataset
    Json,
}

/// One `--set` argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAssignment {
    /// 0-based data row
    pub row: usize,
    pub column: String,
    pub value: String,
}

fn parse_cell_assignment(s: &str) -> Result<CellAssignment, String> {
    let (target, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ROW:COL=VALUE, got {:?}", s))?;
    let (row, column) = target
        .split_once(':')
        .ok_or_else(|| format!("expected ROW:COL before '=', got {:?}", target))?;

    Ok(CellAssignment {
        row: parse_position(row)?,
        column: column.to_string(),
        value: value.to_string(),
    })
}

fn parse_column_move(s: &str) -> Result<(usize, usize), String> {
    let (from, to) = s
        .split_once(':')
        .ok_or_else(|| format!("expected FROM:TO, got {:?}", s))?;
    Ok((parse_position(from)?, parse_position(to)?))
}

fn parse_filter(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(col, text)| (col.to_string(), text.to_string()))
        .ok_or_else(|| format!("expected COL=TEXT, got {:?}", s))
}

/// 1-based position to 0-based index
fn parse_position(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!("expected a position starting at 1, got {:?}", s)),
    }
}

/// Edits requested on the command line, applied in this order:
/// column move, cell edits, row append, row deletions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPlan {
    pub move_column: Option<(usize, usize)>,
    pub set: Vec<CellAssignment>,
    pub add_row: bool,
    /// 0-based data rows
    pub delete_rows: Vec<usize>,
}

impl EditPlan {
    pub fn is_empty(&self) -> bool {
        self.move_column.is_none() && self.set.is_empty() && !self.add_row && self.delete_rows.is_empty()
    }
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub file: PathBuf,
    /// Header flag override; `None` uses the remembered or default setting
    pub headers: Option<bool>,
    pub edits: EditPlan,
    pub format: OutputFormat,
    pub sort: Option<(String, SortOrder)>,
    pub filter: Option<(String, String)>,
    pub watch: bool,
    pub config_path: Option<PathBuf>,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let headers = match (self.headers, self.no_headers) {
            (true, false) => Some(true),
            (false, true) => Some(false),
            (false, false) => None,
            (true, true) => return Err("--headers conflicts with --no-headers".to_string()),
        };

        let delete_rows = self
            .delete_rows
            .iter()
            .map(|n| n.checked_sub(1).ok_or_else(|| "--delete-row starts at 1".to_string()))
            .collect::<Result<Vec<_>, _>>()?;

        let order = if self.desc {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        };

        Ok(RunConfig {
            file: self.file,
            headers,
            edits: EditPlan {
                move_column: self.move_column,
                set: self.set,
                add_row: self.add_row,
                delete_rows,
            },
            format: self.format,
            sort: self.sort.map(|col| (col, order)),
            filter: self.filter,
            watch: self.watch,
            config_path: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(args: &[&str]) -> RunConfig {
        let mut argv = vec!["csv-view"];
        argv.extend_from_slice(args);
        CliArgs::try_parse_from(argv).unwrap().into_config().unwrap()
    }

    #[test]
    fn test_file_only() {
        let config = config(&["data.csv"]);
        assert_eq!(config.file, PathBuf::from("data.csv"));
        assert_eq!(config.headers, None);
        assert!(config.edits.is_empty());
        assert_eq!(config.format, OutputFormat::Table);
        assert!(!config.watch);
    }

    #[test]
    fn test_header_flags() {
        assert_eq!(config(&["d.csv", "--headers"]).headers, Some(true));
        assert_eq!(config(&["d.csv", "--no-headers"]).headers, Some(false));
        assert!(CliArgs::try_parse_from(["csv-view", "d.csv", "--headers", "--no-headers"]).is_err());
    }

    #[test]
    fn test_set_arguments() {
        let config = config(&["d.csv", "--set", "1:B=z", "--set", "3:name=a=b"]);
        assert_eq!(
            config.edits.set,
            vec![
                CellAssignment {
                    row: 0,
                    column: "B".to_string(),
                    value: "z".to_string(),
                },
                CellAssignment {
                    row: 2,
                    column: "name".to_string(),
                    value: "a=b".to_string(),
                },
            ]
        );
    }

    #[test]
    fn test_set_rejects_bad_input() {
        assert!(CliArgs::try_parse_from(["csv-view", "d.csv", "--set", "B=z"]).is_err());
        assert!(CliArgs::try_parse_from(["csv-view", "d.csv", "--set", "0:B=z"]).is_err());
        assert!(CliArgs::try_parse_from(["csv-view", "d.csv", "--set", "1:B"]).is_err());
    }

    #[test]
    fn test_row_positions_are_one_based() {
        let config = config(&["d.csv", "--delete-row", "2", "--move-column", "1:3"]);
        assert_eq!(config.edits.delete_rows, vec![1]);
        assert_eq!(config.edits.move_column, Some((0, 2)));
        assert!(CliArgs::try_parse_from(["csv-view", "d.csv", "--delete-row", "0"])
            .unwrap()
            .into_config()
            .is_err());
    }

    #[test]
    fn test_sort_and_filter() {
        let config = config(&["d.csv", "--sort", "age", "--desc", "--filter", "name=al"]);
        assert_eq!(config.sort, Some(("age".to_string(), SortOrder::Descending)));
        assert_eq!(config.filter, Some(("name".to_string(), "al".to_string())));
        assert!(CliArgs::try_parse_from(["csv-view", "d.csv", "--desc"]).is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(config(&["d.csv", "--format", "json"]).format, OutputFormat::Json);
    }
}
