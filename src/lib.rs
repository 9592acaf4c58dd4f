//! # configfile
//!
//! Typed accessors for configuration values stored in a directory, a YAML
//! file, or environment variables.
//!
//! ## Overview
//!
//! `configfile` reads one flat namespace of string-keyed values. The calling
//! code asks for a value by name and type, and does not care where it lives:
//! - a directory with one file per key (e.g., mounted Kubernetes secrets)
//! - a YAML document whose top level maps keys to scalars
//! - process environment variables (keys are upper-cased)
//!
//! Readers can be chained so a key missing from one source is looked up in
//! the next.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use configfile::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! // Directory, YAML file, or environment, depending on what the path is
//! let config = Reader::new("/etc/myapp")
//!     .with_fallback(Arc::new(Reader::env()));
//!
//! // Required values: panic at startup if missing
//! let db_url = config.must_string("database_url");
//!
//! // Optional values with defaults
//! let port = config.int_or("port", 8080);
//! let debug = config.bool("debug");
//! let timeout = config.duration_or("timeout", Duration::from_secs(30));
//! let key = config.base64("signing_key");
//! ```
//!
//! ## Value rules
//!
//! - **Bytes** and **text** are returned exactly as stored, never trimmed.
//! - **Booleans**: `"0"` and `"false"` (any case) are `false`, any other
//!   non-empty value is `true`, and an empty value is an error.
//! - **Integers** are base-10 `i32`/`i64`; anything else is an error.
//! - **Durations** use compound literals like `"1h30m"` or `"1.5s"`.
//! - **Base64** uses the standard padded alphabet.
//! - **YAML** scalars are read as written: `1.10` stays `"1.10"`.
//!
//! An error never leaks out of the defaulting accessors; it selects the
//! default instead.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod core;
pub mod error;
pub mod sources;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::core::{Reader, ReaderBuilder};
    pub use crate::error::{ConfigError, Result, ValueError};
    pub use crate::sources::{DirSource, EnvSource, MapSource, Source};
}
