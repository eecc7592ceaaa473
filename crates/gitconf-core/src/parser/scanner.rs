//! Line scanner for Git config text.
//!
//! # How the scanner works (for beginners)
//!
//! The input is processed one physical line at a time.  Between lines the
//! scanner remembers exactly one of three states:
//!
//! ```text
//!              ┌────────────────┐   [section]   ┌────────────┐
//!   start ───▶ │ OutsideSection │ ────────────▶ │ InSection  │ ◀─┐
//!              └────────────────┘               └────────────┘   │
//!                                     name = value\ │             │ value ends
//!                                                   ▼             │
//!                                          ┌──────────────────┐  │
//!                                          │   Continuation   │ ─┘
//!                                          └──────────────────┘
//! ```
//!
//! Within a line, a [`Cursor`] walks the characters left to right.  A line
//! may hold several statements: `[branch.main] remote = origin` is a header
//! followed by an assignment.  Value text is handed to the
//! [`ValueDecoder`], which owns the quoting rules and reports whether the
//! value continues on the next line.

use std::mem;

use tracing::{debug, trace};

use crate::codec::escape::decode_escape;
use crate::codec::value::{Segment, ValueDecoder};
use crate::domain::config_dict::ConfigDict;
use crate::domain::names::{is_valid_section_name, is_valid_variable_name};
use crate::domain::section::SectionKey;
use crate::error::{ConfigError, Result};

/// Parses a complete configuration text.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedInput`] on the first grammar violation.
/// No partial store is returned.
///
/// # Examples
///
/// ```rust
/// use gitconf_core::{parse_str, SectionKey};
///
/// let cfg = parse_str("[branch \"main\"]\n\tremote = origin\n").unwrap();
/// let key = SectionKey::with_subsection("branch", "main").unwrap();
/// assert_eq!(cfg.get(&key, "remote").unwrap(), "origin");
/// ```
pub fn parse_str(text: &str) -> Result<ConfigDict> {
    parse_lines(text.lines())
}

/// Parses configuration from an iterator of lines.
///
/// Lines may or may not carry their `\n` / `\r\n` terminator; both are
/// accepted, so the output of `BufRead::lines` and of `read_line` both work.
///
/// # Errors
///
/// Returns [`ConfigError::MalformedInput`] on the first grammar violation.
pub fn parse_lines<I, S>(lines: I) -> Result<ConfigDict>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut scanner = Scanner::new();
    for line in lines {
        scanner.scan_line(line.as_ref())?;
    }
    scanner.finish()
}

/// Where the scanner stands between two lines.
#[derive(Debug)]
enum State {
    OutsideSection,
    InSection(SectionKey),
    /// The previous line ended a value with `\`.
    Continuation {
        section: SectionKey,
        name: String,
        decoder: ValueDecoder,
    },
}

struct Scanner {
    config: ConfigDict,
    state: State,
    line_no: usize,
}

impl Scanner {
    fn new() -> Self {
        Self {
            config: ConfigDict::new(),
            state: State::OutsideSection,
            line_no: 0,
        }
    }

    fn scan_line(&mut self, raw: &str) -> Result<()> {
        self.line_no += 1;
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);
        let mut cursor = Cursor::new(line);

        match mem::replace(&mut self.state, State::OutsideSection) {
            State::Continuation {
                section,
                name,
                decoder,
            } => {
                cursor.skip_whitespace();
                return self.feed_value(section, name, decoder, cursor.rest(), true);
            }
            other => self.state = other,
        }

        loop {
            cursor.skip_whitespace();
            match cursor.peek() {
                None | Some('#') | Some(';') => return Ok(()),
                Some('[') => {
                    cursor.bump();
                    let key = self.section_header(&mut cursor)?;
                    trace!(line = self.line_no, section = %key, "section header");
                    self.config.ensure_section(&key);
                    self.state = State::InSection(key);
                }
                Some(_) => return self.assignment(&mut cursor),
            }
        }
    }

    fn finish(mut self) -> Result<ConfigDict> {
        if let State::Continuation {
            section,
            name,
            decoder,
        } = mem::replace(&mut self.state, State::OutsideSection)
        {
            if decoder.is_quoted() {
                return Err(self.malformed("end of input inside a quoted value"));
            }
            self.store(&section, &name, decoder.finish())?;
        }
        debug!(
            lines = self.line_no,
            sections = self.config.len(),
            "parsed config"
        );
        Ok(self.config)
    }

    // ── Section headers ───────────────────────────────────────────────────────

    /// Parses a header after its `[`, consuming through the closing `]`.
    fn section_header(&self, cursor: &mut Cursor<'_>) -> Result<SectionKey> {
        let name = cursor.take_while(|c| !(c.is_whitespace() || c == ']' || c == '"'));
        if !is_valid_section_name(name) {
            return Err(self.malformed(format!("invalid section name {name:?}")));
        }
        cursor.skip_whitespace();

        let key = match cursor.peek() {
            Some('"') => {
                cursor.bump();
                let subsection = self.quoted_subsection(cursor)?;
                cursor.skip_whitespace();
                SectionKey::with_subsection(name, &subsection)
            }
            // `SectionKey::new` handles the legacy `[section.subsection]` form.
            Some(']') => SectionKey::new(name),
            Some(c) => {
                return Err(self.malformed(format!("unexpected {c:?} in section header")));
            }
            None => return Err(self.malformed("expected ']' to close section header")),
        }
        .map_err(|e| self.malformed(e.to_string()))?;

        match cursor.bump() {
            Some(']') => Ok(key),
            _ => Err(self.malformed("expected ']' to close section header")),
        }
    }

    /// Reads a subsection after its opening quote, consuming the closing one.
    fn quoted_subsection(&self, cursor: &mut Cursor<'_>) -> Result<String> {
        let mut subsection = String::new();
        loop {
            match cursor.bump() {
                Some('"') => return Ok(subsection),
                Some('\\') => match cursor.bump() {
                    Some(escaped) => subsection.push(decode_escape(escaped)),
                    None => break,
                },
                Some(c) => subsection.push(c),
                None => break,
            }
        }
        Err(self.malformed(format!("unterminated subsection name {subsection:?}")))
    }

    // ── Assignments ───────────────────────────────────────────────────────────

    /// Parses `name`, `name = value` or `name = value \` to the end of line.
    fn assignment(&mut self, cursor: &mut Cursor<'_>) -> Result<()> {
        let section = match &self.state {
            State::InSection(key) => key.clone(),
            _ => return Err(self.malformed("variable defined before any section header")),
        };

        let name = cursor.take_while(|c| !(c == '=' || c == '#' || c == ';' || c.is_whitespace()));
        if !is_valid_variable_name(name) {
            return Err(self.malformed(format!("invalid variable name {name:?}")));
        }
        cursor.skip_whitespace();

        match cursor.peek() {
            // A bare key is a boolean switched on.
            None | Some('#') | Some(';') => self.store(&section, name, "true".to_string()),
            Some('=') => {
                cursor.bump();
                cursor.skip_whitespace();
                self.feed_value(section, name.to_string(), ValueDecoder::new(), cursor.rest(), false)
            }
            Some(c) => Err(self.malformed(format!("expected '=' after {name:?}, found {c:?}"))),
        }
    }

    /// Feeds one line of value text and moves to the next state.
    fn feed_value(
        &mut self,
        section: SectionKey,
        name: String,
        mut decoder: ValueDecoder,
        text: &str,
        continuation_line: bool,
    ) -> Result<()> {
        match decoder.feed(text, continuation_line) {
            Segment::Continued => {
                self.state = State::Continuation {
                    section,
                    name,
                    decoder,
                };
            }
            Segment::Complete => {
                if decoder.is_quoted() {
                    return Err(self.malformed(format!("unterminated quoted value for {name:?}")));
                }
                self.store(&section, &name, decoder.finish())?;
                self.state = State::InSection(section);
            }
        }
        Ok(())
    }

    fn store(&mut self, section: &SectionKey, name: &str, value: String) -> Result<()> {
        let line = self.line_no;
        self.config
            .set(section, name, value)
            .map_err(|e| ConfigError::malformed(line, e.to_string()))
    }

    fn malformed(&self, reason: impl Into<String>) -> ConfigError {
        ConfigError::malformed(self.line_no, reason)
    }
}

// ── Cursor ────────────────────────────────────────────────────────────────────

/// A read position within one line.
struct Cursor<'a> {
    line: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { line, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.line[start..self.pos]
    }

    fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }
}
