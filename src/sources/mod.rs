//! Configuration source implementations.

mod detect;
mod dir;
mod env;
mod map;
mod source;

pub use detect::{SourceKind, from_path};
pub use dir::DirSource;
pub use env::{EnvLookup, EnvSource, ProcessEnv};
pub use map::MapSource;
pub use source::Source;
