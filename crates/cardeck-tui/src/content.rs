//! HTML-to-text rendering for card faces.

/// Convert a card face's HTML fragment to plain text wrapped at `width`.
/// Malformed HTML falls back to the raw fragment rather than erroring.
pub fn html_to_text(html: &str, width: usize) -> String {
    html2text::from_read(html.as_bytes(), width.max(1))
        .unwrap_or_else(|_| html.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_markup() {
        let text = html_to_text("<p>What is <b>ownership</b>?</p>", 40);
        assert!(text.contains("ownership"));
        assert!(!text.contains("<b>"));
    }

    #[test]
    fn test_wraps_to_width() {
        let text = html_to_text("<p>one two three four five six seven eight nine ten</p>", 12);
        assert!(text.lines().all(|l| l.len() <= 12));
    }

    #[test]
    fn test_empty_input() {
        assert!(html_to_text("", 40).trim().is_empty());
    }
}
