//! Error types for configfile.

use std::num::ParseIntError;

/// Result type alias for configfile operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur when reading configuration.
///
/// Accessors only ever see two kinds in practice: [`ConfigError::NotFound`]
/// and [`ConfigError::ParseError`]. The remaining variants are produced by
/// strict constructors and the builder.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The key is absent from the source (or from every source in a chain).
    #[error("Configuration key not found: {key}")]
    NotFound {
        /// The requested key
        key: String,
    },

    /// The key was found but its value could not be converted.
    #[error("Failed to parse configuration key '{key}': {source}")]
    ParseError {
        /// The requested key
        key: String,
        /// Why the conversion failed
        #[source]
        source: ValueError,
    },

    /// A structured document could not be parsed into a flat map.
    #[error("Failed to parse configuration document: {0}")]
    DocumentError(String),

    /// IO error occurred while loading a document.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// A reader chain was requested without any sources.
    #[error("No configuration sources specified")]
    NoSources,
}

impl ConfigError {
    /// Create a not-found error for `key`.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Create a parse error for `key`.
    pub fn parse(key: impl Into<String>, source: ValueError) -> Self {
        Self::ParseError {
            key: key.into(),
            source,
        }
    }

    /// Returns `true` if this error means the key is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Conversion failure for a raw configuration value.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The value is present but empty.
    #[error("value is empty")]
    Empty,

    /// The value is not valid UTF-8 text.
    #[error("value is not valid UTF-8")]
    InvalidUtf8,

    /// The value could not be parsed into the requested type.
    #[error("invalid value: {0}")]
    Invalid(String),

    /// The value is not a base-10 integer in range.
    #[error("invalid integer: {0}")]
    InvalidInt(#[from] ParseIntError),

    /// The value is not valid standard base64.
    #[error("invalid base64: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    /// The value does not follow the duration grammar.
    #[error("invalid duration {0:?}")]
    InvalidDuration(String),

    /// A duration component has no unit suffix.
    #[error("missing unit in duration {0:?}")]
    MissingUnit(String),

    /// A duration component has an unrecognized unit suffix.
    #[error("unknown unit {unit:?} in duration {value:?}")]
    UnknownUnit {
        /// The offending unit
        unit: String,
        /// The full duration text
        value: String,
    },

    /// The duration does not fit in 64 bits of nanoseconds.
    #[error("duration {0:?} is out of range")]
    DurationOverflow(String),

    /// The duration is below zero.
    #[error("duration {0:?} is negative")]
    NegativeDuration(String),
}
