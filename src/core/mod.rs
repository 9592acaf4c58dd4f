//! Core reader types.

mod builder;
pub(crate) mod parse;
mod reader;

pub use builder::ReaderBuilder;
pub use parse::parse_duration;
pub use reader::Reader;
