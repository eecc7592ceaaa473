//! Backslash escaping for configuration values.
//!
//! Escape table:
//! ```text
//! \\  backslash      \"  double quote
//! \n  newline        \t  tab
//! \b  backspace
//! ```
//! Any other escaped character decodes to itself (`\x` → `x`).

/// Decodes backslash escape sequences in `text`.
///
/// A lone backslash at the very end of `text` is kept as-is.
///
/// # Examples
///
/// ```rust
/// use gitconf_core::codec::unescape;
///
/// assert_eq!(unescape(r"\tbar\t"), "\tbar\t");
/// assert_eq!(unescape(r#"\"foo\""#), "\"foo\"");
/// ```
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some(escaped) => out.push(decode_escape(escaped)),
            None => out.push('\\'),
        }
    }
    out
}

/// Encodes `value` so that [`unescape`] restores it exactly.
///
/// # Examples
///
/// ```rust
/// use gitconf_core::codec::{escape, unescape};
///
/// assert_eq!(escape("foo\\"), r"foo\\");
/// assert_eq!(escape("foo\n"), r"foo\n");
/// assert_eq!(unescape(&escape("a\t\"b\"")), "a\t\"b\"");
/// ```
pub fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '"' => out.push_str("\\\""),
            '\u{8}' => out.push_str("\\b"),
            other => out.push(other),
        }
    }
    out
}

/// Maps the character following a backslash to the character it stands for.
pub(crate) fn decode_escape(escaped: char) -> char {
    match escaped {
        'n' => '\n',
        't' => '\t',
        'b' => '\u{8}',
        other => other,
    }
}

/// Returns `true` if `escape` would rewrite `c`.
pub(crate) fn needs_escape(c: char) -> bool {
    matches!(c, '\\' | '\n' | '\t' | '"' | '\u{8}')
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── unescape ──────────────────────────────────────────────────────────────

    #[test]
    fn test_unescape_empty_string() {
        assert_eq!(unescape(""), "");
    }

    #[test]
    fn test_unescape_tab() {
        assert_eq!(unescape("\\tbar\\t"), "\tbar\t");
    }

    #[test]
    fn test_unescape_newline() {
        assert_eq!(unescape("\\nbar\\t"), "\nbar\t");
    }

    #[test]
    fn test_unescape_quote() {
        assert_eq!(unescape("\\\"foo\\\""), "\"foo\"");
    }

    #[test]
    fn test_unescape_unknown_sequence_passes_character_through() {
        assert_eq!(unescape("a\\qb"), "aqb");
    }

    #[test]
    fn test_unescape_trailing_backslash_is_kept() {
        assert_eq!(unescape("abc\\"), "abc\\");
    }

    // ── escape ────────────────────────────────────────────────────────────────

    #[test]
    fn test_escape_plain_text_is_unchanged() {
        assert_eq!(escape("foo"), "foo");
    }

    #[test]
    fn test_escape_backslash() {
        assert_eq!(escape("foo\\"), "foo\\\\");
    }

    #[test]
    fn test_escape_newline() {
        assert_eq!(escape("foo\n"), "foo\\n");
    }

    #[test]
    fn test_unescape_reverses_escape_for_special_characters() {
        for s in [
            "",
            "plain",
            "back\\slash",
            "tab\there",
            "line\nbreak",
            "\"quoted\"",
            "\\n is not a newline",
            "mixed \\\t\"\n\u{8} end\\",
        ] {
            assert_eq!(unescape(&escape(s)), s, "round trip failed for {s:?}");
        }
    }
}
