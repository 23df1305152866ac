//! CSV parsing and serialization using the csv crate
//!
//! RFC 4180 compliant parsing with support for quoted fields,
//! escaped quotes, and custom delimiters. Parsing never interprets a
//! header row; headers are applied to the parsed records afterwards.

use std::borrow::Cow;
use std::io::Cursor;

use super::label::synthesized_labels;
use super::model::{Delimiter, Dialect, LineEnding, Table};
use crate::error::ViewError;

const BOM: char = '\u{FEFF}';

/// Characters `detect_delimiter` can pick
const CANDIDATES: [char; 4] = [',', '\t', '|', ';'];

/// Error type for CSV parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "CSV parse error at line {}: {}", line, self.message),
            None => write!(f, "CSV parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Output of a headerless parse
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    /// Records in file order, as parsed (not padded)
    pub rows: Vec<Vec<String>>,
    /// Synthesized labels covering the widest record
    pub fields: Vec<String>,
    /// Records the codec could not read; the others are still in `rows`
    pub errors: Vec<ParseError>,
    /// Formatting detected in the input
    pub dialect: Dialect,
}

/// Parse CSV text without header interpretation
///
/// A leading byte-order mark is removed before parsing. `delimiter` forces
/// the delimiter; `None` detects it from content.
pub fn parse(text: &str, delimiter: Option<Delimiter>) -> ParseResult {
    let (content, bom) = match text.strip_prefix(BOM) {
        Some(rest) => (rest, true),
        None => (text, false),
    };

    let dialect = Dialect {
        delimiter: delimiter.unwrap_or_else(|| detect_delimiter(content)),
        line_ending: LineEnding::detect(content),
        trailing_newline: content.ends_with('\n'),
        bom,
    };

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(dialect.delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut errors = Vec::new();

    for (line_num, result) in reader.records().enumerate() {
        match result {
            Ok(record) => {
                let row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
                rows.push(row);
            }
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize)
                    .unwrap_or(line_num + 1);
                tracing::warn!("Skipping unreadable CSV record at line {}: {}", line, e);
                errors.push(ParseError {
                    message: e.to_string(),
                    line: Some(line),
                });
            }
        }
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);

    ParseResult {
        rows,
        fields: synthesized_labels(width),
        errors,
        dialect,
    }
}

/// Load text into a table
///
/// Returns the table together with any per-record parse errors so the
/// caller can surface them; a partial table is still usable.
pub fn load(text: &str, has_headers: bool, delimiter: Option<Delimiter>) -> (Table, Vec<ParseError>) {
    let parsed = parse(text, delimiter);
    let table = Table::from_records(parsed.rows, has_headers, parsed.dialect);
    (table, parsed.errors)
}

/// Quote a field that holds a quote, a line break or any candidate
/// delimiter, so reloading detects the same delimiter
fn quote_field(field: &str) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| matches!(c, '"' | '\r' | '\n') || CANDIDATES.contains(&c));
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn write_record(writer: &mut csv::Writer<Vec<u8>>, record: &[String]) -> Result<(), ViewError> {
    let fields: Vec<Cow<'_, str>> = match record {
        // A lone empty field would otherwise be a blank line, which reads back as nothing
        [only] if only.is_empty() => vec![Cow::Borrowed("\"\"")],
        _ => record.iter().map(|f| quote_field(f)).collect(),
    };
    writer
        .write_record(fields.iter().map(|f| f.as_bytes()))
        .map_err(|e| ViewError::Serialize(e.to_string()))
}

/// Serialize a table back into text using its dialect
///
/// The header record is written first only when the table is headered, and
/// holds only declared labels. The final record gets a terminator only if
/// the loaded text had one.
pub fn serialize(table: &Table) -> Result<String, ViewError> {
    let dialect = table.dialect();
    let terminator = match dialect.line_ending {
        LineEnding::Lf => csv::Terminator::Any(b'\n'),
        LineEnding::Crlf => csv::Terminator::CRLF,
    };

    // Fields arrive already quoted
    let mut writer = csv::WriterBuilder::new()
        .delimiter(dialect.delimiter.char() as u8)
        .terminator(terminator)
        .quote_style(csv::QuoteStyle::Never)
        .flexible(true)
        .from_writer(Vec::new());

    let mut wrote_any = false;
    if let Some(header) = table.header_record() {
        write_record(&mut writer, &header)?;
        wrote_any = true;
    }
    for row in table.rows() {
        write_record(&mut writer, &row.fields)?;
        wrote_any = true;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ViewError::Serialize(e.to_string()))?;
    let mut text = String::from_utf8(bytes).map_err(|e| ViewError::Serialize(e.to_string()))?;

    if wrote_any && !dialect.trailing_newline {
        let ending = dialect.line_ending.as_str();
        if text.ends_with(ending) {
            text.truncate(text.len() - ending.len());
        }
    }

    if dialect.bom {
        text.insert(0, BOM);
    }

    Ok(text)
}

/// Detect delimiter by analyzing the first few records
///
/// Characters inside quoted fields are not counted.
pub fn detect_delimiter(content: &str) -> Delimiter {
    let (mut comma_count, mut tab_count, mut pipe_count, mut semi_count) = (0, 0, 0, 0);
    let mut in_quotes = false;
    let mut lines = 0;

    for c in content.chars() {
        match c {
            '"' => in_quotes = !in_quotes,
            _ if in_quotes => {}
            '\n' => {
                lines += 1;
                if lines == 5 {
                    break;
                }
            }
            ',' => comma_count += 1,
            '\t' => tab_count += 1,
            '|' => pipe_count += 1,
            ';' => semi_count += 1,
            _ => {}
        }
    }

    let max = comma_count.max(tab_count).max(pipe_count).max(semi_count);

    if max == 0 || comma_count == max {
        Delimiter::Comma
    } else if tab_count == max {
        Delimiter::Tab
    } else if semi_count == max {
        Delimiter::Semicolon
    } else {
        Delimiter::Pipe
    }
}
