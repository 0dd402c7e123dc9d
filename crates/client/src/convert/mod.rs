//! HTML-to-text conversion.
//!
//! An explicit two-pass pipeline:
//!
//! 1. *Pruning pass* — strip a declared set of non-content elements
//!    (scripts, styles, navigation, sidebars) from the parsed tree.
//! 2. *Conversion pass* — walk the pruned tree and emit Markdown preserving
//!    heading structure, lists, and links as inline references.
//!
//! Keeping the passes separate keeps the pruning rules independently
//! testable. Conversion is best-effort and never fails; malformed markup
//! degrades to whatever text the parser recovered.

pub mod markdown;
pub mod prune;

use scraper::Html;

/// A converted page body with its best-effort title.
#[derive(Debug, Clone)]
pub struct ConvertedPage {
    /// Text of the `<title>` element; empty when none was found.
    pub title: String,
    /// Markdown body, free of script/style/navigation markup.
    pub body: String,
    /// True when the body was cut at `max_chars`.
    pub truncated: bool,
}

/// Convert an HTML document to bounded Markdown text.
pub fn convert_html(html: &str, max_chars: usize) -> ConvertedPage {
    let mut doc = Html::parse_document(html);
    prune::prune(&mut doc);

    let title = markdown::extract_title(&doc);
    let body = markdown::to_markdown(&doc);
    let (body, truncated) = truncate_chars(body, max_chars);

    ConvertedPage { title, body, truncated }
}

/// Bound a string to `max_chars` Unicode scalar values.
pub fn truncate_chars(text: String, max_chars: usize) -> (String, bool) {
    if text.chars().count() <= max_chars {
        (text, false)
    } else {
        (text.chars().take(max_chars).collect(), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Cluster upgrades</title>
            <script>window.analytics = {};</script>
        </head>
        <body>
            <nav class="td-navbar">
                <a href="/home/">Home</a>
                <span>NavigationMarker</span>
            </nav>
            <main>
                <h1>Upgrading a cluster</h1>
                <p>Upgrades are rolled out node by node. See the
                   <a href="https://docs.giantswarm.io/reference/">reference</a>
                   for details.</p>
            </main>
            <footer>FooterMarker</footer>
        </body>
        </html>
    "#;

    #[test]
    fn test_convert_keeps_content_and_drops_chrome() {
        let page = convert_html(SAMPLE_HTML, 80_000);

        assert_eq!(page.title, "Cluster upgrades");
        assert!(page.body.contains("# Upgrading a cluster"));
        assert!(page.body.contains("Upgrades are rolled out node by node"));
        assert!(page.body.contains("https://docs.giantswarm.io/reference/"));

        assert!(!page.body.contains("NavigationMarker"));
        assert!(!page.body.contains("FooterMarker"));
        assert!(!page.body.contains("window.analytics"));
        assert!(!page.truncated);
    }

    #[test]
    fn test_convert_truncates_long_pages() {
        let paragraphs: String =
            (0..200).map(|i| format!("<p>Paragraph number {i} with some text.</p>")).collect();
        let html = format!("<html><body>{paragraphs}</body></html>");

        let page = convert_html(&html, 1_000);
        assert!(page.truncated);
        assert_eq!(page.body.chars().count(), 1_000);
    }

    #[test]
    fn test_convert_empty_title() {
        let page = convert_html("<html><body><p>No title here.</p></body></html>", 80_000);
        assert_eq!(page.title, "");
        assert!(page.body.contains("No title here."));
    }

    #[test]
    fn test_truncate_chars_under_limit_unmodified() {
        let (text, truncated) = truncate_chars("short".to_string(), 100);
        assert_eq!(text, "short");
        assert!(!truncated);
    }

    #[test]
    fn test_truncate_chars_at_limit() {
        let (text, truncated) = truncate_chars("exact".to_string(), 5);
        assert_eq!(text, "exact");
        assert!(!truncated);
    }

    #[test]
    fn test_truncate_chars_over_limit() {
        let (text, truncated) = truncate_chars("abcdefgh".to_string(), 5);
        assert_eq!(text, "abcde");
        assert!(truncated);
    }

    #[test]
    fn test_truncate_chars_is_char_aware() {
        let (text, truncated) = truncate_chars("ääääää".to_string(), 3);
        assert_eq!(text, "äää");
        assert!(truncated);
    }
}
