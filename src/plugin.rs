//! Host registration details for the CSV view
//!
//! The view registers under the `csv` view type, claims the `csv` extension
//! and uses a document icon with the extension printed inside it.

use std::path::Path;

/// View type name
pub const VIEW_TYPE: &str = "csv";

/// File extensions opened with the CSV view
pub const EXTENSIONS: &[&str] = &["csv"];

/// Title used when the view has no file
pub const NO_FILE_TEXT: &str = "csv (no file)";

/// Everything a host needs to register the view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRegistration {
    pub view_type: &'static str,
    pub extensions: &'static [&'static str],
    pub icon_id: String,
    pub icon_svg: String,
}

/// Registration for the CSV view
pub fn registration() -> ViewRegistration {
    ViewRegistration {
        view_type: VIEW_TYPE,
        extensions: EXTENSIONS,
        icon_id: icon_id("csv"),
        icon_svg: document_icon_svg("csv"),
    }
}

/// Icon id for a document icon, e.g. `document-csv`
pub fn icon_id(extension: &str) -> String {
    format!("document-{}", extension)
}

/// The regular document outline with the extension written inside it
///
/// Drawn on a 100x100 canvas.
pub fn document_icon_svg(extension: &str) -> String {
    format!(
        r#"<path fill="currentColor" stroke="currentColor" d="M14,4v92h72V29.2l-0.6-0.6l-24-24L60.8,4L14,4z M18,8h40v24h24v60H18L18,8z M62,10.9L79.1,28H62V10.9z"></path>
<text font-family="sans-serif" font-weight="bold" font-size="30" fill="currentColor" x="50%" y="60%" dominant-baseline="middle" text-anchor="middle">{}</text>"#,
        escape_xml(extension)
    )
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Whether the view opens files with this extension
pub fn can_accept_extension(extension: &str) -> bool {
    EXTENSIONS.contains(&extension)
}

/// Tab title: the file name without extension
pub fn display_text(path: Option<&Path>) -> String {
    path.and_then(|p| p.file_stem())
        .map(|stem| stem.to_string_lossy().to_string())
        .unwrap_or_else(|| NO_FILE_TEXT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration() {
        let reg = registration();
        assert_eq!(reg.view_type, "csv");
        assert_eq!(reg.extensions, ["csv"]);
        assert_eq!(reg.icon_id, "document-csv");
        assert!(reg.icon_svg.contains(">csv</text>"));
    }

    #[test]
    fn test_can_accept_extension() {
        assert!(can_accept_extension("csv"));
        assert!(!can_accept_extension("md"));
        assert!(!can_accept_extension("tsv"));
    }

    #[test]
    fn test_display_text() {
        assert_eq!(display_text(Some(Path::new("/vault/people.csv"))), "people");
        assert_eq!(display_text(None), "csv (no file)");
    }

    #[test]
    fn test_icon_escapes_extension() {
        assert!(document_icon_svg("<x>").contains("&lt;x&gt;"));
    }
}
