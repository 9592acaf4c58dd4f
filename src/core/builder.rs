//! Builder for constructing reader chains.

use crate::core::Reader;
use crate::error::{ConfigError, Result};
use crate::sources::{self, DirSource, EnvLookup, EnvSource, MapSource, Source};
use std::path::PathBuf;
use std::sync::Arc;

/// Builder for a [`Reader`] with an ordered list of fallback sources.
///
/// Sources are consulted in the order they are added: the first one is the
/// primary source, and each later one is the fallback of the one before it.
///
/// # Examples
///
/// ```rust,no_run
/// use configfile::prelude::*;
///
/// # fn example() -> Result<()> {
/// // Mounted secrets first, then a YAML file, then the environment
/// let config = Reader::builder()
///     .with_dir("/run/secrets")
///     .with_yaml_file("config/default.yaml")
///     .with_env()
///     .build()?;
///
/// let port = config.int_or("port", 8080);
/// # Ok(())
/// # }
/// ```
#[derive(Default)]
pub struct ReaderBuilder {
    sources: Vec<Arc<dyn Source>>,
}

impl ReaderBuilder {
    /// Create a new builder with no sources.
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    /// Add a directory of one-file-per-key values.
    pub fn with_dir(self, base: impl Into<PathBuf>) -> Self {
        self.with_source(DirSource::new(base))
    }

    /// Add a YAML file. A missing or malformed file contributes no keys.
    pub fn with_yaml_file(self, path: impl Into<PathBuf>) -> Self {
        self.with_source(MapSource::from_yaml_file(path.into()))
    }

    /// Add the process environment.
    pub fn with_env(self) -> Self {
        self.with_source(EnvSource::new())
    }

    /// Add an environment served by a custom lookup.
    pub fn with_env_lookup(self, lookup: impl EnvLookup + 'static) -> Self {
        self.with_source(EnvSource::with_lookup(lookup))
    }

    /// Add whichever source `path` describes; see [`Reader::new`].
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(Arc::from(sources::from_path(path.into())));
        self
    }

    /// Add a custom configuration source.
    pub fn with_source<S: Source + 'static>(mut self, source: S) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    /// Add a source that is shared with other readers.
    pub fn with_shared_source(mut self, source: Arc<dyn Source>) -> Self {
        self.sources.push(source);
        self
    }

    /// Number of sources added so far.
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if no sources have been added.
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Build the reader chain.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoSources`] if no source was added.
    pub fn build(self) -> Result<Reader> {
        let mut sources = self.sources.into_iter().rev();
        let last = sources.next().ok_or(ConfigError::NoSources)?;

        let reader = sources.fold(Reader::from_shared(last), |fallback, source| {
            Reader::from_shared(source).with_fallback(Arc::new(fallback))
        });

        tracing::debug!(sources = ?reader.source_names(), "built configuration reader");
        Ok(reader)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_empty_builder() {
        let result = ReaderBuilder::new().build();
        assert!(matches!(result, Err(ConfigError::NoSources)));
    }

    #[test]
    fn test_builder_accumulates_sources() {
        let builder = ReaderBuilder::new()
            .with_dir("/run/secrets")
            .with_yaml_file("/nonexistent/config.yaml")
            .with_env();

        assert_eq!(builder.len(), 3);
        assert!(!builder.is_empty());
    }

    #[test]
    fn test_order_is_precedence() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("port"), "1111").unwrap();

        let yaml_path = temp_dir.path().join("config.yaml");
        fs::write(&yaml_path, "port: 2222\nhost: yaml-host\n").unwrap();

        let env = HashMap::from([
            ("PORT".to_string(), "3333".to_string()),
            ("REGION".to_string(), "eu".to_string()),
        ]);

        let reader = ReaderBuilder::new()
            .with_dir(temp_dir.path())
            .with_yaml_file(&yaml_path)
            .with_env_lookup(env)
            .build()
            .unwrap();

        assert_eq!(reader.int("port"), 1111);
        assert_eq!(reader.string("host"), "yaml-host");
        assert_eq!(reader.string("region"), "eu");
        assert!(reader.try_string("missing").unwrap_err().is_not_found());

        let names = reader.source_names();
        assert_eq!(names.len(), 3);
        assert!(names[0].starts_with("dir:"));
        assert!(names[1].starts_with("yaml:"));
        assert_eq!(names[2], "env");
    }

    #[test]
    fn test_single_source_has_no_fallback() {
        let reader = ReaderBuilder::new()
            .with_source(MapSource::default())
            .build()
            .unwrap();
        assert!(reader.fallback().is_none());
    }

    #[test]
    fn test_with_path_detects_kind() {
        let temp_dir = TempDir::new().unwrap();
        let reader = ReaderBuilder::new()
            .with_path(temp_dir.path())
            .with_path("/nonexistent/configfile/path")
            .build()
            .unwrap();

        let names = reader.source_names();
        assert!(names[0].starts_with("dir:"));
        assert_eq!(names[1], "env");
    }
}
