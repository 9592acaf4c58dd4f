//! The typed configuration reader and its fallback chain.

use crate::core::{ReaderBuilder, parse};
use crate::error::{ConfigError, Result, ValueError};
use crate::sources::{self, DirSource, EnvSource, MapSource, Source};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Typed access to configuration values held by a [`Source`].
///
/// Every value type comes with four accessors:
///
/// - `*_or(key, default)` returns `default` when the key is missing or its
///   value does not convert;
/// - the bare accessor (`string`, `int`, ...) does the same with the type's
///   zero value as default;
/// - `must_*` panics instead, for values the program cannot start without;
/// - `try_*` returns the [`ConfigError`] so the caller can propagate it.
///
/// When the reader's own source does not have a key, the lookup continues
/// in the fallback reader, then in its fallback, and so on. A key is missing
/// only if every source in the chain reports it as not found.
///
/// Readers hold no mutable state and can be shared freely across threads.
///
/// # Examples
///
/// ```rust,no_run
/// use configfile::prelude::*;
/// use std::sync::Arc;
/// use std::time::Duration;
///
/// let env = Arc::new(Reader::env());
/// let config = Reader::new("/run/secrets").with_fallback(env);
///
/// let db_url = config.must_string("database_url");
/// let port = config.int_or("port", 8080);
/// let timeout = config.duration_or("timeout", Duration::from_secs(30));
/// ```
#[derive(Clone)]
pub struct Reader {
    source: Arc<dyn Source>,
    fallback: Option<Arc<Reader>>,
}

impl Reader {
    /// Create a reader by inspecting `path`.
    ///
    /// A directory yields a directory reader, any other existing path a YAML
    /// document reader, and a missing path an environment reader.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self::from_shared(Arc::from(sources::from_path(path)))
    }

    /// Create a reader over a directory of one-file-per-key values.
    pub fn dir(base: impl Into<PathBuf>) -> Self {
        Self::from_source(DirSource::new(base))
    }

    /// Create a reader over a YAML file.
    ///
    /// A missing or malformed file yields a reader with no keys.
    pub fn yaml(path: impl AsRef<Path>) -> Self {
        Self::from_source(MapSource::from_yaml_file(path))
    }

    /// Create a reader over YAML text.
    ///
    /// Malformed text yields a reader with no keys.
    pub fn yaml_str(text: &str) -> Self {
        Self::from_source(MapSource::from_yaml_str(text))
    }

    /// Create a reader over the process environment.
    pub fn env() -> Self {
        Self::from_source(EnvSource::new())
    }

    /// Create a reader over any source.
    pub fn from_source<S: Source + 'static>(source: S) -> Self {
        Self::from_shared(Arc::new(source))
    }

    /// Create a reader over a source that is shared with other readers.
    pub fn from_shared(source: Arc<dyn Source>) -> Self {
        Self {
            source,
            fallback: None,
        }
    }

    /// Create a builder for a reader chain.
    pub fn builder() -> ReaderBuilder {
        ReaderBuilder::new()
    }

    /// Set the reader consulted when this reader's source lacks a key.
    ///
    /// Replaces any previously set fallback. Since the fallback must already
    /// exist, chains can never loop back on themselves.
    pub fn with_fallback(mut self, fallback: Arc<Reader>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// The fallback reader, if any.
    pub fn fallback(&self) -> Option<&Reader> {
        self.fallback.as_deref()
    }

    /// The source this reader consults first.
    pub fn source(&self) -> &dyn Source {
        self.source.as_ref()
    }

    /// Names of every source in the chain, in lookup order.
    pub fn source_names(&self) -> Vec<String> {
        self.chain().map(|reader| reader.source.name()).collect()
    }

    fn chain(&self) -> impl Iterator<Item = &Reader> {
        std::iter::successors(Some(self), |reader| reader.fallback())
    }

    /// Read the raw bytes for `key`, walking the fallback chain.
    ///
    /// Only [`ConfigError::NotFound`] moves the lookup on to the fallback;
    /// any other error from a source is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no source in the chain has the key.
    pub fn read(&self, key: &str) -> Result<Vec<u8>> {
        let mut reader = self;
        loop {
            match reader.source.read(key) {
                Err(err) if err.is_not_found() => match reader.fallback() {
                    Some(next) => {
                        tracing::trace!(
                            key,
                            from = %reader.source.name(),
                            to = %next.source.name(),
                            "key not found, trying fallback"
                        );
                        reader = next;
                    }
                    None => return Err(err),
                },
                result => return result,
            }
        }
    }

    fn read_text(&self, key: &str) -> Result<String> {
        let bytes = self.read(key)?;
        parse::text(bytes).map_err(|e| ConfigError::parse(key, e))
    }

    fn read_with<T>(
        &self,
        key: &str,
        convert: impl FnOnce(&str) -> std::result::Result<T, ValueError>,
    ) -> Result<T> {
        let text = self.read_text(key)?;
        convert(&text).map_err(|e| ConfigError::parse(key, e))
    }

    // Bytes

    /// Read raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing from every source.
    pub fn try_bytes(&self, key: &str) -> Result<Vec<u8>> {
        self.read(key)
    }

    /// Read raw bytes, or `default` if the key is missing.
    pub fn bytes_or(&self, key: &str, default: impl Into<Vec<u8>>) -> Vec<u8> {
        self.try_bytes(key).unwrap_or_else(|_| default.into())
    }

    /// Read raw bytes, or an empty vector if the key is missing.
    pub fn bytes(&self, key: &str) -> Vec<u8> {
        self.bytes_or(key, Vec::new())
    }

    /// Read raw bytes.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing from every source. An empty value does
    /// not panic.
    #[track_caller]
    pub fn must_bytes(&self, key: &str) -> Vec<u8> {
        must(self.try_bytes(key))
    }

    // Text

    /// Read UTF-8 text, untrimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the value is not UTF-8.
    pub fn try_string(&self, key: &str) -> Result<String> {
        self.read_text(key)
    }

    /// Read text, or `default` if the key is missing or not UTF-8.
    pub fn string_or(&self, key: &str, default: impl Into<String>) -> String {
        self.try_string(key).unwrap_or_else(|_| default.into())
    }

    /// Read text, or an empty string if the key is missing or not UTF-8.
    pub fn string(&self, key: &str) -> String {
        self.string_or(key, String::new())
    }

    /// Read text.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing or the value is not UTF-8. An empty value
    /// does not panic.
    #[track_caller]
    pub fn must_string(&self, key: &str) -> String {
        must(self.try_string(key))
    }

    // Integers

    /// Read a base-10 `i32`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the value is not an integer
    /// in range.
    pub fn try_int(&self, key: &str) -> Result<i32> {
        self.read_with(key, |s| Ok(s.parse::<i32>()?))
    }

    /// Read an `i32`, or `default` on any failure.
    pub fn int_or(&self, key: &str, default: i32) -> i32 {
        self.try_int(key).unwrap_or(default)
    }

    /// Read an `i32`, or `0` on any failure.
    pub fn int(&self, key: &str) -> i32 {
        self.int_or(key, 0)
    }

    /// Read an `i32`.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing or the value is not an integer in range.
    #[track_caller]
    pub fn must_int(&self, key: &str) -> i32 {
        must(self.try_int(key))
    }

    /// Read a base-10 `i64`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the value is not an integer
    /// in range.
    pub fn try_int64(&self, key: &str) -> Result<i64> {
        self.read_with(key, |s| Ok(s.parse::<i64>()?))
    }

    /// Read an `i64`, or `default` on any failure.
    pub fn int64_or(&self, key: &str, default: i64) -> i64 {
        self.try_int64(key).unwrap_or(default)
    }

    /// Read an `i64`, or `0` on any failure.
    pub fn int64(&self, key: &str) -> i64 {
        self.int64_or(key, 0)
    }

    /// Read an `i64`.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing or the value is not an integer in range.
    #[track_caller]
    pub fn must_int64(&self, key: &str) -> i64 {
        must(self.try_int64(key))
    }

    // Booleans

    /// Read a boolean.
    ///
    /// `"0"` and `"false"` in any casing are `false`, any other non-empty
    /// value is `true`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the value is empty.
    pub fn try_bool(&self, key: &str) -> Result<bool> {
        self.read_with(key, parse::boolean)
    }

    /// Read a boolean, or `default` if the key is missing or empty.
    pub fn bool_or(&self, key: &str, default: bool) -> bool {
        self.try_bool(key).unwrap_or(default)
    }

    /// Read a boolean, or `false` if the key is missing or empty.
    pub fn bool(&self, key: &str) -> bool {
        self.bool_or(key, false)
    }

    /// Read a boolean.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing or the value is empty.
    #[track_caller]
    pub fn must_bool(&self, key: &str) -> bool {
        must(self.try_bool(key))
    }

    // Durations

    /// Read a duration such as `"3m5s"`; see
    /// [`parse_duration`](crate::core::parse_duration).
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or the value is not a duration.
    pub fn try_duration(&self, key: &str) -> Result<Duration> {
        self.read_with(key, parse::parse_duration)
    }

    /// Read a duration, or `default` on any failure.
    pub fn duration_or(&self, key: &str, default: Duration) -> Duration {
        self.try_duration(key).unwrap_or(default)
    }

    /// Read a duration, or zero on any failure.
    pub fn duration(&self, key: &str) -> Duration {
        self.duration_or(key, Duration::ZERO)
    }

    /// Read a duration.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing or the value is not a duration.
    #[track_caller]
    pub fn must_duration(&self, key: &str) -> Duration {
        must(self.try_duration(key))
    }

    // Base64

    /// Read standard base64 text and decode it.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing, empty, or not valid base64.
    pub fn try_base64(&self, key: &str) -> Result<Vec<u8>> {
        self.read_with(key, parse::base64)
    }

    /// Decode base64, or `default` on any failure.
    pub fn base64_or(&self, key: &str, default: impl Into<Vec<u8>>) -> Vec<u8> {
        self.try_base64(key).unwrap_or_else(|_| default.into())
    }

    /// Decode base64, or an empty vector on any failure.
    pub fn base64(&self, key: &str) -> Vec<u8> {
        self.base64_or(key, Vec::new())
    }

    /// Decode base64.
    ///
    /// # Panics
    ///
    /// Panics if the key is missing, empty, or not valid base64.
    #[track_caller]
    pub fn must_base64(&self, key: &str) -> Vec<u8> {
        must(self.try_base64(key))
    }

    // Anything else

    /// Read text and parse it with [`FromStr`].
    ///
    /// # Errors
    ///
    /// Returns an error if the key is missing or parsing fails.
    pub fn try_parse<T>(&self, key: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.read_with(key, |s| {
            s.parse::<T>()
                .map_err(|e| ValueError::Invalid(e.to_string()))
        })
    }

    /// Read text and parse it with [`FromStr`], or `default` on any failure.
    pub fn parse_or<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        self.try_parse(key).unwrap_or(default)
    }
}

impl fmt::Debug for Reader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reader")
            .field("source", &self.source.name())
            .field("fallback", &self.fallback)
            .finish()
    }
}

/// Unwrap a required value, treating failure as a deployment defect.
#[track_caller]
fn must<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => {
            tracing::error!(error = %err, "required configuration value unavailable");
            panic!("{err}")
        }
    }
}
