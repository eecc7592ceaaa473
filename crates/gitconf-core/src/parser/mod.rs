//! Reading and writing Git config text.

pub mod scanner;
pub mod writer;

pub use scanner::{parse_lines, parse_str};
pub use writer::write_config;
