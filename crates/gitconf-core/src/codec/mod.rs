//! Text codec for configuration values: escaping and quoting.

pub mod escape;
pub mod value;

pub use escape::{escape, unescape};
pub use value::{format_value, parse_value};
