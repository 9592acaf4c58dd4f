//! Source selection from a filesystem path.

use super::{DirSource, EnvSource, MapSource, Source};
use std::fs;
use std::path::Path;

/// The kind of source a path maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The path is a directory of one-file-per-key values.
    Dir,
    /// The path exists and is not a directory; it is parsed as a YAML document.
    Document,
    /// The path does not exist (or cannot be inspected); use the environment.
    Env,
}

impl SourceKind {
    /// Inspect `path` and decide which kind of source it describes.
    ///
    /// This looks only at file metadata, never at content.
    pub fn detect(path: impl AsRef<Path>) -> Self {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Self::Dir,
            Ok(_) => Self::Document,
            Err(_) => Self::Env,
        }
    }
}

impl std::fmt::Display for SourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceKind::Dir => write!(f, "dir"),
            SourceKind::Document => write!(f, "document"),
            SourceKind::Env => write!(f, "env"),
        }
    }
}

/// Build the source that `path` describes.
///
/// A directory becomes a [`DirSource`], any other existing path a
/// [`MapSource`] parsed as YAML (an unparseable file silently yields an empty
/// map), and a missing path an [`EnvSource`] over the process environment.
pub fn from_path(path: impl AsRef<Path>) -> Box<dyn Source> {
    let path = path.as_ref();
    let kind = SourceKind::detect(path);
    tracing::debug!(path = %path.display(), %kind, "selected configuration source");

    match kind {
        SourceKind::Dir => Box::new(DirSource::new(path)),
        SourceKind::Document => Box::new(MapSource::from_yaml_file(path)),
        SourceKind::Env => Box::new(EnvSource::new()),
    }
}
