//! Quoting rules for configuration values.
//!
//! A value on disk is a run of quoted and unquoted segments:
//!
//! ```text
//! name = "  leading space" and more # trailing comment
//!        └─ quoted ───────┘└ bare ┘ └ ignored ───────┘
//! ```
//!
//! - Inside quotes every character is literal except `\` escapes and the
//!   closing `"`.
//! - Outside quotes `#` and `;` start a comment, runs of whitespace between
//!   words are kept, and whitespace at either end is dropped.
//! - A backslash as the last character of a line joins the next line on.
//!
//! [`ValueDecoder`] implements those rules incrementally so the line parser
//! can feed it one physical line at a time.

use std::borrow::Cow;

use crate::codec::escape::{decode_escape, escape, needs_escape};
use crate::error::{ConfigError, Result};

/// Renders `value` the way it must appear after `name = ` on disk.
///
/// Values that would not survive a bare round trip (leading or trailing
/// whitespace, comment characters, quotes, backslashes, control escapes)
/// are wrapped in double quotes and escaped.  Everything else, including the
/// empty string, is returned unchanged.
///
/// # Examples
///
/// ```rust
/// use gitconf_core::codec::format_value;
///
/// assert_eq!(format_value("foo bar"), "foo bar");
/// assert_eq!(format_value(" foo"), "\" foo\"");
/// assert_eq!(format_value("\tfoo"), "\"\\tfoo\"");
/// ```
pub fn format_value(value: &str) -> Cow<'_, str> {
    if requires_quoting(value) {
        Cow::Owned(format!("\"{}\"", escape(value)))
    } else {
        Cow::Borrowed(value)
    }
}

/// Decodes the on-disk text of a single value.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedInput`] if a quote is opened but never
/// closed.
///
/// There is no next line to join, so a lone backslash at the very end is
/// kept, as [`unescape`](crate::codec::unescape) does.
///
/// # Examples
///
/// ```rust
/// use gitconf_core::codec::parse_value;
///
/// assert_eq!(parse_value("\" foo\"").unwrap(), " foo");
/// assert_eq!(parse_value("\"bar\"la").unwrap(), "barla");
/// assert_eq!(parse_value("foo bar # note").unwrap(), "foo bar");
/// assert!(parse_value("\"open").is_err());
/// ```
pub fn parse_value(text: &str) -> Result<String> {
    let mut decoder = ValueDecoder::new();
    if decoder.feed(text, false) == Segment::Continued {
        decoder.push('\\');
    }
    if decoder.is_quoted() {
        return Err(ConfigError::malformed(1, "value starts a quote but lacks the closing quote"));
    }
    Ok(decoder.finish())
}

fn requires_quoting(value: &str) -> bool {
    let edge_space = value.starts_with(char::is_whitespace) || value.ends_with(char::is_whitespace);
    edge_space
        || value
            .chars()
            .any(|c| needs_escape(c) || c == '#' || c == ';')
}

// ── Incremental decoder ───────────────────────────────────────────────────────

/// How a fed segment ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    /// The value ends on this line.
    Complete,
    /// The line ended with an unescaped backslash; the value continues.
    Continued,
}

/// Accumulates one value across one or more physical lines.
#[derive(Debug, Default, Clone)]
pub(crate) struct ValueDecoder {
    value: String,
    /// Unquoted whitespace seen since the last content character.  Only
    /// committed if more content follows, which trims trailing whitespace.
    pending_space: String,
    started: bool,
    quoted: bool,
}

impl ValueDecoder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Decodes `text`, which holds the rest of one physical line.
    ///
    /// With `literal_lead` set, a `#` or `;` in the first position is value
    /// text rather than a comment; the parser sets it on continuation lines.
    pub(crate) fn feed(&mut self, text: &str, literal_lead: bool) -> Segment {
        let mut chars = text.chars();
        let mut at_start = true;
        while let Some(c) = chars.next() {
            let lead = std::mem::replace(&mut at_start, false);
            match c {
                '\\' => match chars.next() {
                    Some(escaped) => self.push(decode_escape(escaped)),
                    None => return Segment::Continued,
                },
                '"' => {
                    self.commit_space();
                    self.started = true;
                    self.quoted = !self.quoted;
                }
                '#' | ';' if !self.quoted && !(literal_lead && lead) => break,
                c if c.is_whitespace() && !self.quoted => {
                    if self.started {
                        self.pending_space.push(c);
                    }
                }
                c => self.push(c),
            }
        }
        Segment::Complete
    }

    /// `true` while a quoted segment is open.
    pub(crate) fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// Returns the decoded value, dropping trailing unquoted whitespace.
    pub(crate) fn finish(self) -> String {
        self.value
    }

    fn push(&mut self, c: char) {
        self.commit_space();
        self.started = true;
        self.value.push(c);
    }

    fn commit_space(&mut self) {
        if !self.pending_space.is_empty() {
            self.value.push_str(&self.pending_space);
            self.pending_space.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── format_value ──────────────────────────────────────────────────────────

    #[test]
    fn test_format_value_quotes_leading_whitespace() {
        assert_eq!(format_value(" foo"), "\" foo\"");
        assert_eq!(format_value("\tfoo"), "\"\\tfoo\"");
    }

    #[test]
    fn test_format_value_quotes_trailing_whitespace() {
        assert_eq!(format_value("foo "), "\"foo \"");
    }

    #[test]
    fn test_format_value_leaves_plain_text_bare() {
        assert_eq!(format_value("foo"), "foo");
        assert_eq!(format_value("foo bar"), "foo bar");
        assert!(matches!(format_value("foo bar"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_format_value_empty_string_is_bare() {
        assert_eq!(format_value(""), "");
    }

    #[test]
    fn test_format_value_quotes_comment_characters() {
        assert_eq!(format_value("a#b"), "\"a#b\"");
        assert_eq!(format_value("a;b"), "\"a;b\"");
    }

    #[test]
    fn test_format_value_escapes_backslash_and_quote() {
        assert_eq!(format_value("C:\\dir"), "\"C:\\\\dir\"");
        assert_eq!(format_value("say \"hi\""), "\"say \\\"hi\\\"\"");
    }

    // ── parse_value ───────────────────────────────────────────────────────────

    #[test]
    fn test_parse_value_quoted() {
        assert_eq!(parse_value("\" foo\"").unwrap(), " foo");
        assert_eq!(parse_value("\"\\tfoo\"").unwrap(), "\tfoo");
    }

    #[test]
    fn test_parse_value_not_quoted() {
        assert_eq!(parse_value("foo").unwrap(), "foo");
        assert_eq!(parse_value("foo bar").unwrap(), "foo bar");
    }

    #[test]
    fn test_parse_value_concatenates_text_after_closing_quote() {
        assert_eq!(parse_value("\"bar\"la").unwrap(), "barla");
    }

    #[test]
    fn test_parse_value_keeps_space_between_bare_and_quoted_segments() {
        assert_eq!(parse_value("a \" b \" c").unwrap(), "a  b  c");
    }

    #[test]
    fn test_parse_value_strips_inline_comment_and_trailing_space() {
        assert_eq!(parse_value("foo   # a comment").unwrap(), "foo");
        assert_eq!(parse_value("foo ; another").unwrap(), "foo");
    }

    #[test]
    fn test_parse_value_comment_character_inside_quotes_is_literal() {
        assert_eq!(parse_value("\"a # b\" # real comment").unwrap(), "a # b");
    }

    #[test]
    fn test_parse_value_unterminated_quote_is_malformed() {
        let result = parse_value("\"bar");
        assert!(matches!(result, Err(ConfigError::MalformedInput { .. })));
    }

    #[test]
    fn test_parse_value_keeps_lone_trailing_backslash() {
        assert_eq!(parse_value("bar\\").unwrap(), "bar\\");
        assert_eq!(parse_value("bar \\").unwrap(), "bar \\");
    }

    #[test]
    fn test_parse_value_inverts_format_value() {
        for s in ["", "x", " lead", "trail\t", "a#b;c", "q\"uote", "back\\", "two\nlines"] {
            assert_eq!(parse_value(&format_value(s)).unwrap(), s, "value {s:?}");
        }
    }

    // ── ValueDecoder ──────────────────────────────────────────────────────────

    #[test]
    fn test_decoder_reports_continuation_on_trailing_backslash() {
        let mut decoder = ValueDecoder::new();
        assert_eq!(decoder.feed("bar\\", false), Segment::Continued);
        assert_eq!(decoder.feed("la", false), Segment::Complete);
        assert_eq!(decoder.finish(), "barla");
    }

    #[test]
    fn test_decoder_carries_quote_state_across_continuation() {
        let mut decoder = ValueDecoder::new();
        assert_eq!(decoder.feed("\"one \\", false), Segment::Continued);
        assert!(decoder.is_quoted());
        decoder.feed("two\"", false);
        assert!(!decoder.is_quoted());
        assert_eq!(decoder.finish(), "one two");
    }

    #[test]
    fn test_decoder_literal_lead_keeps_leading_comment_character() {
        let mut decoder = ValueDecoder::new();
        decoder.feed("a\\", false);
        decoder.feed("#b", true);
        assert_eq!(decoder.finish(), "a#b");
    }
}
