// Sanitization utilities for text that came from the remote API

/// Make remote text safe to print on a terminal.
/// Normalizes CRLF line endings and strips control characters (escape
/// sequences included) except newlines and tabs.
pub fn sanitize_text(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Collapse all whitespace runs (newlines included) into single spaces
pub fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncate text to a maximum number of characters, appending `...`
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Text preview in the style of a result card: first `len` characters
/// followed by an ellipsis
pub fn preview(text: &str, len: usize) -> String {
    let flat = single_line(&sanitize_text(text));
    let head: String = flat.chars().take(len).collect();
    format!("{head}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_text() {
        assert_eq!(sanitize_text("Boil\r\nServe\r\n"), "Boil\nServe");
        assert_eq!(sanitize_text("red \u{1b}[31mtext"), "red [31mtext");
        assert_eq!(sanitize_text("a\tb"), "a\tb");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        // Multi-byte characters must not split
        assert_eq!(truncate("crème brûlée tart", 8), "crème...");
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("Heat oil.\r\nAdd onions.", 9), "Heat oil....");
        assert_eq!(preview("Short", 100), "Short...");
    }
}
