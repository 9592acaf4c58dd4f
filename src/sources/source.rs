//! Configuration source trait.

use crate::error::Result;

/// Trait for configuration sources.
///
/// A source maps a key to the raw bytes stored for it. Implement this trait to
/// read values from other backing media (e.g., a secrets store mounted as a
/// key-value service).
///
/// Sources are immutable once built, so a single instance can be shared
/// across threads without locking.
pub trait Source: Send + Sync {
    /// Read the raw value stored for `key`.
    ///
    /// A present-but-empty value is `Ok(vec![])`, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`](crate::error::ConfigError::NotFound)
    /// if the key is absent. Readers only consult their fallback on that
    /// variant; any other error is returned to the caller unchanged.
    fn read(&self, key: &str) -> Result<Vec<u8>>;

    /// Get a human-readable name for this source (for logging/debugging).
    fn name(&self) -> String;
}
