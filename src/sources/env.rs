//! Environment variable configuration source.

use super::Source;
use crate::error::{ConfigError, Result};
use std::collections::HashMap;
use std::ffi::OsString;

/// Lookup service for environment variables.
///
/// [`EnvSource`] reads through this trait so tests can substitute a fixed map
/// for the process environment.
pub trait EnvLookup: Send + Sync {
    /// Look up a variable by its exact name.
    ///
    /// Returns `None` if the variable is unset. A variable set to the empty
    /// string must return `Some` with an empty value.
    fn lookup(&self, name: &str) -> Option<OsString>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<OsString> {
        std::env::var_os(name)
    }
}

impl EnvLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<OsString> {
        self.get(name).map(OsString::from)
    }
}

/// Environment variable configuration source.
///
/// Keys are upper-cased before lookup and no prefix is applied, so
/// `reader.string("database_url")` reads `DATABASE_URL`. A variable that is
/// set to the empty string is a present, empty value; an unset variable is
/// not found.
///
/// # Examples
///
/// ```rust
/// use configfile::sources::{EnvSource, Source};
/// use std::collections::HashMap;
///
/// let vars = HashMap::from([("PORT".to_string(), "8080".to_string())]);
/// let source = EnvSource::with_lookup(vars);
/// assert_eq!(source.read("port").unwrap(), b"8080");
/// ```
pub struct EnvSource {
    lookup: Box<dyn EnvLookup>,
}

impl EnvSource {
    /// Create a source over the process environment.
    pub fn new() -> Self {
        Self::with_lookup(ProcessEnv)
    }

    /// Create a source over a custom lookup service.
    pub fn with_lookup(lookup: impl EnvLookup + 'static) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }
}

impl Default for EnvSource {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EnvSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnvSource").finish_non_exhaustive()
    }
}

impl Source for EnvSource {
    fn read(&self, key: &str) -> Result<Vec<u8>> {
        self.lookup
            .lookup(&key.to_uppercase())
            .map(OsString::into_encoded_bytes)
            .ok_or_else(|| ConfigError::not_found(key))
    }

    fn name(&self) -> String {
        "env".to_string()
    }
}
