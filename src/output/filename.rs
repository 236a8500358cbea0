/// Characters never allowed in an output filename, beyond control characters
const FORBIDDEN_CHARS: &[char] = &['/', '\\', ':', '&', '^', '"', '\'', '$', '*'];

/// Returns true if the character may not appear in an output filename
fn is_forbidden(c: char) -> bool {
    ('\u{01}'..='\u{1f}').contains(&c) || FORBIDDEN_CHARS.contains(&c)
}

/// Converts arbitrary text (e.g. a page title) into a safe filename
///
/// Every forbidden character (control characters 1-31 plus
/// `/ \ : & ^ " ' $ *`) is replaced with a space, the result is trimmed,
/// and runs of two or more spaces collapse into one. Trailing forbidden
/// characters need no separate strip: after replacement they are spaces and
/// the trim removes them.
///
/// Idempotent: `sanitize_filename(sanitize_filename(x)) == sanitize_filename(x)`.
///
/// # Examples
///
/// ```
/// use pagesift::output::sanitize_filename;
///
/// assert_eq!(sanitize_filename("Report: 2024/25"), "Report 2024 25");
/// ```
pub fn sanitize_filename(text: &str) -> String {
    let replaced: String = text
        .chars()
        .map(|c| if is_forbidden(c) { ' ' } else { c })
        .collect();

    let mut result = String::with_capacity(replaced.len());
    let mut previous_was_space = false;
    for c in replaced.trim().chars() {
        if c == ' ' {
            if !previous_was_space {
                result.push(' ');
            }
            previous_was_space = true;
        } else {
            result.push(c);
            previous_was_space = false;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_with_colon_and_slash() {
        assert_eq!(sanitize_filename("Report: 2024/25"), "Report 2024 25");
    }

    #[test]
    fn test_clean_text_unchanged() {
        assert_eq!(sanitize_filename("Plain Title"), "Plain Title");
    }

    #[test]
    fn test_all_forbidden_punctuation_replaced() {
        assert_eq!(sanitize_filename(r#"a/b\c:d&e^f"g'h$i*j"#), "a b c d e f g h i j");
    }

    #[test]
    fn test_control_characters_replaced() {
        assert_eq!(sanitize_filename("a\u{01}b\tc\nd"), "a b c d");
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(sanitize_filename("a    b  c"), "a b c");
    }

    #[test]
    fn test_leading_and_trailing_whitespace_trimmed() {
        assert_eq!(sanitize_filename("  title  "), "title");
    }

    #[test]
    fn test_trailing_forbidden_chars_removed() {
        // Replacement turns them into spaces; trim takes care of the rest.
        assert_eq!(sanitize_filename("title:::"), "title");
        assert_eq!(sanitize_filename("title /"), "title");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Report: 2024/25",
            "  messy \\ title * here  ",
            "plain",
            "a\u{02}\u{03}b",
            "",
        ];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_never_contains_forbidden_or_double_space() {
        let inputs = ["a:b:c", "x//y", "a\u{1f}b", "  a   b  ", "$$$"];
        for input in inputs {
            let clean = sanitize_filename(input);
            assert!(
                !clean.chars().any(is_forbidden),
                "forbidden char survived in {clean:?}"
            );
            assert!(!clean.contains("  "), "double space survived in {clean:?}");
        }
    }

    #[test]
    fn test_all_forbidden_input_becomes_empty() {
        assert_eq!(sanitize_filename(":::///***"), "");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_filename(""), "");
    }
}
