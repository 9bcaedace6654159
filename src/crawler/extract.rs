//! Embedded reference extraction
//!
//! Scans text content for `href=` and `src=` attribute assignments and
//! stylesheet `url(...)` constructs, in any case, and yields the quoted
//! values in first-occurrence order. The scan is a plain regex over the raw
//! text rather than a DOM walk, so it works on CSS and other text-like
//! content as well as HTML.

use once_cell::sync::Lazy;
use regex::Regex;

static REFERENCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?:href *=|src *=|url *\() *\(? *["'](.*?)["']"#).unwrap()
});

/// Extracts embedded reference strings from `content`
///
/// Results follow first occurrence in the content. The raw strings are not
/// resolved here; the caller resolves each against the referring location.
pub fn extract_references(content: &str) -> Vec<&str> {
    REFERENCE_RE
        .captures_iter(content)
        .map(|caps| caps.get(1).map_or("", |m| m.as_str()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_href_double_quoted() {
        assert_eq!(
            extract_references(r#"<a href="page.html">x</a>"#),
            vec!["page.html"]
        );
    }

    #[test]
    fn test_href_single_quoted() {
        assert_eq!(
            extract_references("<a href='page.html'>x</a>"),
            vec!["page.html"]
        );
    }

    #[test]
    fn test_src_attribute() {
        assert_eq!(
            extract_references(r#"<img src="logo.png">"#),
            vec!["logo.png"]
        );
    }

    #[test]
    fn test_markers_are_case_insensitive() {
        assert_eq!(
            extract_references(r#"<A HREF="a.html"><IMG SRC="b.png">"#),
            vec!["a.html", "b.png"]
        );
    }

    #[test]
    fn test_css_url_construct() {
        assert_eq!(
            extract_references(r#"body { background: url("bg.jpg"); }"#),
            vec!["bg.jpg"]
        );
    }

    #[test]
    fn test_spaces_before_value() {
        assert_eq!(
            extract_references(r#"href  =  "a.html" url  (  'b.css')"#),
            vec!["a.html", "b.css"]
        );
    }

    #[test]
    fn test_first_occurrence_order() {
        let content = r#"
            <link href="style.css">
            <script src="app.js"></script>
            <a href="next.html">next</a>
        "#;
        assert_eq!(
            extract_references(content),
            vec!["style.css", "app.js", "next.html"]
        );
    }

    #[test]
    fn test_unquoted_value_is_ignored() {
        assert!(extract_references("<a href=page.html>x</a>").is_empty());
    }

    #[test]
    fn test_empty_content() {
        assert!(extract_references("").is_empty());
    }

    #[test]
    fn test_empty_quoted_value() {
        assert_eq!(extract_references(r#"href="""#), vec![""]);
    }

    #[test]
    fn test_absolute_and_relative_mixed() {
        let content = r#"<a href="http://other.example/x">a</a><a href="../up">b</a>"#;
        assert_eq!(
            extract_references(content),
            vec!["http://other.example/x", "../up"]
        );
    }
}
