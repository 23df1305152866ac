//! Text and HTML rendering of a table
//!
//! Renders rows in a given display order with:
//! - Row numbers column
//! - Column labels header
//! - Numbers right-aligned, long cells truncated

use std::fmt::Write as _;

use super::model::{RowId, Table};
use crate::host::CellRenderer;

const MIN_WIDTH: usize = 4;
const MAX_WIDTH: usize = 40;

/// Check if a string looks like a number (for right-alignment)
pub fn is_number(s: &str) -> bool {
    if s.is_empty() {
        return false;
    }
    s.parse::<f64>().is_ok()
}

/// Truncate text with ellipsis if too long
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else if max_chars <= 1 {
        s.chars().take(max_chars).collect()
    } else {
        let mut result: String = s.chars().take(max_chars - 1).collect();
        result.push('…');
        result
    }
}

/// Single-line form of a cell (embedded newlines shown as `⏎`)
fn flatten(s: &str) -> String {
    s.replace("\r\n", "⏎").replace(['\n', '\r'], "⏎")
}

/// Column widths in characters, from labels and the first 100 rows
fn column_widths(table: &Table, order: &[RowId]) -> Vec<usize> {
    let mut widths: Vec<usize> = table
        .labels()
        .iter()
        .map(|l| l.chars().count().clamp(MIN_WIDTH, MAX_WIDTH))
        .collect();

    for id in order.iter().take(100) {
        let Some(row) = table.row(*id) else { continue };
        for (col, cell) in row.iter().enumerate() {
            if col < widths.len() {
                let cell_width = flatten(cell).chars().count();
                widths[col] = widths[col].max(cell_width).min(MAX_WIDTH);
            }
        }
    }

    widths
}

/// Render rows as an aligned plain-text table
pub fn render_text(table: &Table, order: &[RowId]) -> String {
    let widths = column_widths(table, order);
    let number_width = order.len().max(1).to_string().len();
    let mut out = String::new();

    let _ = write!(out, "{:>w$}", "", w = number_width);
    for (label, width) in table.labels().iter().zip(&widths) {
        let _ = write!(out, " | {:<w$}", truncate_text(&flatten(label), *width), w = *width);
    }
    out.push('\n');

    let _ = write!(out, "{}", "-".repeat(number_width));
    for width in &widths {
        let _ = write!(out, "-+-{}", "-".repeat(*width));
    }
    out.push('\n');

    for (n, id) in order.iter().enumerate() {
        let Some(row) = table.row(*id) else { continue };
        let _ = write!(out, "{:>w$}", n + 1, w = number_width);
        for (cell, width) in row.iter().zip(&widths) {
            let text = truncate_text(&flatten(cell), *width);
            if is_number(cell.trim()) {
                let _ = write!(out, " | {:>w$}", text, w = *width);
            } else {
                let _ = write!(out, " | {:<w$}", text, w = *width);
            }
        }
        out.push('\n');
    }

    out
}

/// Render rows as an HTML table, cells drawn by `renderer`
pub fn render_html(table: &Table, order: &[RowId], renderer: &dyn CellRenderer) -> String {
    let mut out = String::from("<table>\n<thead><tr>");
    for label in table.labels() {
        out.push_str("<th>");
        out.push_str(&escape_html(label));
        out.push_str("</th>");
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for id in order {
        let Some(row) = table.row(*id) else { continue };
        let _ = write!(out, "<tr data-row-id=\"{}\">", id);
        for cell in row {
            out.push_str("<td>");
            renderer.render(cell, &mut out);
            out.push_str("</td>");
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
    out
}

/// Escape text for HTML content and attribute values
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv::load;
    use crate::host::PlainRenderer;

    #[test]
    fn test_is_number() {
        assert!(is_number("42"));
        assert!(is_number("-3.5"));
        assert!(!is_number(""));
        assert!(!is_number("abc"));
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("hello", 10), "hello");
        assert_eq!(truncate_text("hello world", 6), "hello…");
        assert_eq!(truncate_text("hello", 1), "h");
    }

    #[test]
    fn test_render_text() {
        let (table, _) = load("name,qty\napple,3\nkiwi,12\n", true, None);
        let text = render_text(&table, &table.row_ids());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "  | name  | qty ");
        assert_eq!(lines[1], "--+-------+-----");
        assert_eq!(lines[2], "1 | apple |    3");
        assert_eq!(lines[3], "2 | kiwi  |   12");
    }

    #[test]
    fn test_render_text_flattens_newlines() {
        let (table, _) = load("\"a\nb\"\n", false, None);
        let text = render_text(&table, &table.row_ids());
        assert!(text.contains("a⏎b"));
    }

    #[test]
    fn test_render_html_escapes_labels() {
        let (table, _) = load("<b>\nx\n", true, None);
        let html = render_html(&table, &table.row_ids(), &PlainRenderer);

        assert!(html.contains("<th>&lt;b&gt;</th>"));
        assert!(html.contains("<td>x</td>"));
    }

    #[test]
    fn test_render_html_escapes_plain_cells() {
        let (table, _) = load("<script>alert(1)</script>\n", false, None);
        let html = render_html(&table, &table.row_ids(), &PlainRenderer);

        assert!(!html.contains("<script>"));
        assert!(html.contains("<td>&lt;script&gt;alert(1)&lt;/script&gt;</td>"));
    }
}
