//! Markdown to HTML renderer using pulldown-cmark

use pulldown_cmark::{html, Event, Options, Parser, Tag, TagEnd};

use crate::host::CellRenderer;

/// Render a cell's markdown to an HTML fragment
///
/// A cell that is a single paragraph renders inline, without the wrapping
/// `<p>`. Raw HTML in the cell is escaped rather than passed through.
pub fn cell_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let events: Vec<Event> = Parser::new_ext(markdown, options)
        .map(|event| match event {
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
            other => other,
        })
        .collect();

    let paragraphs = events
        .iter()
        .filter(|e| matches!(e, Event::Start(Tag::Paragraph)))
        .count();
    let single_paragraph = paragraphs == 1
        && matches!(events.first(), Some(Event::Start(Tag::Paragraph)))
        && matches!(events.last(), Some(Event::End(TagEnd::Paragraph)));

    let mut html_output = String::new();
    if single_paragraph {
        html::push_html(
            &mut html_output,
            events[1..events.len() - 1].iter().cloned(),
        );
    } else {
        html::push_html(&mut html_output, events.into_iter());
    }

    html_output.trim_end().to_string()
}

/// Cell renderer producing HTML fragments
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl CellRenderer for MarkdownRenderer {
    fn render(&self, text: &str, target: &mut String) {
        target.push_str(&cell_to_html(text));
    }
}
