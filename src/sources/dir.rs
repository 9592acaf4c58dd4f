//! Directory configuration source (one file per key).

use super::Source;
use crate::error::{ConfigError, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};

/// Directory-based configuration source.
///
/// Each key is a regular file directly under the base directory; the file's
/// content is the value, byte for byte (trailing newlines are kept). This is
/// the layout used by mounted secret volumes.
///
/// # Examples
///
/// ```rust,no_run
/// use configfile::sources::DirSource;
///
/// // /run/secrets/db_password -> "db_password"
/// let source = DirSource::new("/run/secrets");
/// ```
#[derive(Debug, Clone)]
pub struct DirSource {
    base: PathBuf,
}

impl DirSource {
    /// Create a new directory source rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// The base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Resolve `key` to a file path, rejecting anything that is not a single
    /// plain file name.
    fn key_path(&self, key: &str) -> Option<PathBuf> {
        let mut components = Path::new(key).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) if name == key => Some(self.base.join(name)),
            _ => None,
        }
    }
}

impl Source for DirSource {
    fn read(&self, key: &str) -> Result<Vec<u8>> {
        let path = self
            .key_path(key)
            .ok_or_else(|| ConfigError::not_found(key))?;

        // Missing, unreadable and is-a-directory all look the same upstream
        fs::read(&path).map_err(|_| ConfigError::not_found(key))
    }

    fn name(&self) -> String {
        format!("dir:{}", self.base.display())
    }
}
