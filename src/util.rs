//! Shared string helpers

/// Truncate to at most `max_bytes` without splitting a UTF-8 character.
///
/// ```
/// use agentdoc::util::truncate_utf8_safe;
///
/// assert_eq!(truncate_utf8_safe("iVBORw0KGgo", 5), "iVBOR");
/// assert_eq!(truncate_utf8_safe("日本語", 4), "日");
/// ```
pub fn truncate_utf8_safe(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Strip control characters that corrupt terminal output
///
/// Drops ANSI CSI sequences (`ESC [ ... letter`), carriage returns,
/// backspace, DEL and other ASCII controls. Tabs and newlines survive.
pub fn sanitize_for_terminal(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' => {
                if chars.peek() == Some(&'[') {
                    chars.next();
                    for next in chars.by_ref() {
                        if next.is_ascii_alphabetic() {
                            break;
                        }
                    }
                }
            }
            '\t' | '\n' => result.push(ch),
            c if c.is_ascii_control() => {}
            _ => result.push(ch),
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_shorter_than_max() {
        assert_eq!(truncate_utf8_safe("data", 10), "data");
    }

    #[test]
    fn test_truncate_at_utf8_boundary() {
        let s = "日本語";
        assert_eq!(truncate_utf8_safe(s, 4), "日");
        assert_eq!(truncate_utf8_safe(s, 6), "日本");
        assert_eq!(truncate_utf8_safe(s, 0), "");
    }

    #[test]
    fn test_sanitize_strips_escapes_and_controls() {
        assert_eq!(
            sanitize_for_terminal("\x1b[31mred\x1b[0m\r\nok\x08\tend"),
            "red\nok\tend"
        );
    }

    #[test]
    fn test_sanitize_keeps_unicode() {
        assert_eq!(sanitize_for_terminal("café ▼ 日本"), "café ▼ 日本");
    }
}
