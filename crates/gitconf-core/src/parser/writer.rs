//! Serialisation of a [`ConfigDict`] back to Git config text.
//!
//! Output format:
//! ```text
//! [section]
//! \tname = value
//! [section "subsection"]
//! \tname = "quoted value "
//! ```
//! Comments and original whitespace are not preserved; parsing the output
//! yields a store equal to the one written.

use std::fmt;
use std::io;

use tracing::debug;

use crate::codec::value::format_value;
use crate::domain::config_dict::ConfigDict;

/// Writes `config` into any [`fmt::Write`] sink.
///
/// Sections and variables come out in insertion order.  Subsections are
/// always written in the quoted form, whatever form they were read in.
pub fn write_config<W: fmt::Write>(config: &ConfigDict, out: &mut W) -> fmt::Result {
    for section in config.sections() {
        writeln!(out, "[{section}]")?;
        for (name, value) in config.items(section) {
            writeln!(out, "\t{name} = {}", format_value(value))?;
        }
    }
    Ok(())
}

impl ConfigDict {
    /// Writes the serialised store to `out`.
    ///
    /// # Errors
    ///
    /// Propagates any I/O error from `out`.
    pub fn write_to<W: io::Write>(&self, out: &mut W) -> io::Result<()> {
        let text = self.to_string();
        out.write_all(text.as_bytes())?;
        debug!(bytes = text.len(), sections = self.len(), "wrote config");
        Ok(())
    }
}
