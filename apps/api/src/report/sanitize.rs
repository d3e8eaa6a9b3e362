//! Control-character stripping for text placed into the fixed-layout reports.

/// C0 controls other than TAB, LF and CR, plus DEL.
fn is_stripped(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

/// Single-line field: strips control characters, folds line breaks into a
/// space and trims. A single-line slot never spans lines of the report.
pub fn sanitize_input(value: &str) -> String {
    value
        .chars()
        .filter(|c| !is_stripped(*c))
        .map(|c| if matches!(c, '\n' | '\r') { ' ' } else { c })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Multi-line field: sanitizes each line on its own, keeping line breaks.
pub fn sanitize_multiline(value: &str) -> String {
    value
        .split('\n')
        .map(sanitize_input)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_control_characters() {
        assert_eq!(sanitize_input("ab\u{0}c\u{7}d\u{1b}[31m\u{7f}"), "abcd[31m");
    }

    #[test]
    fn test_keeps_tabs_inside_and_trims_edges() {
        assert_eq!(sanitize_input("  a\tb  "), "a\tb");
    }

    #[test]
    fn test_single_line_folds_line_breaks() {
        assert_eq!(sanitize_input("123\nCE-Called-In-Yes:[X]"), "123 CE-Called-In-Yes:[X]");
        assert_eq!(sanitize_input(" a\r\nb\r "), "a  b");
    }

    #[test]
    fn test_multiline_trims_each_line() {
        assert_eq!(
            sanitize_multiline("  first \r\n\u{0c}second\u{0b}  \n\n  third"),
            "first\nsecond\n\nthird"
        );
    }

    #[test]
    fn test_empty() {
        assert_eq!(sanitize_input(""), "");
        assert_eq!(sanitize_multiline(""), "");
    }
}
