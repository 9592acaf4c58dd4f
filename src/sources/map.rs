//! In-memory map configuration source, typically loaded from a YAML document.

use super::Source;
use crate::error::{ConfigError, Result};
use serde::de::{
    self, DeserializeSeed, Deserializer, EnumAccess, IgnoredAny, MapAccess, SeqAccess,
    VariantAccess, Visitor,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io::Read;
use std::path::Path;

/// Map-based configuration source.
///
/// Holds a flat string-to-string map that is filled once at construction and
/// never mutated afterwards. The usual way to build one is from a YAML
/// document whose top level is a mapping of scalar values.
///
/// The lenient constructors ([`from_yaml_file`](Self::from_yaml_file),
/// [`from_yaml_str`](Self::from_yaml_str), [`from_reader`](Self::from_reader))
/// never fail: a missing or malformed document yields an empty map, so every
/// read reports not-found and the reader falls through to defaults or its
/// fallback. Use the `try_` constructors to surface the document error.
///
/// # Examples
///
/// ```rust
/// use configfile::sources::{MapSource, Source};
///
/// let source = MapSource::from_yaml_str("port: 8080\nhost: localhost\n");
/// assert_eq!(source.read("port").unwrap(), b"8080");
/// ```
#[derive(Debug, Clone)]
pub struct MapSource {
    name: String,
    values: HashMap<String, String>,
}

impl MapSource {
    /// Create a source over an existing map.
    pub fn from_map(values: HashMap<String, String>) -> Self {
        Self {
            name: "map".to_string(),
            values,
        }
    }

    /// Parse a YAML file, degrading to an empty map on any failure.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        Self::try_from_yaml_file(path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable configuration document");
            Self::empty(format!("yaml:{}", path.display()))
        })
    }

    /// Parse YAML text, degrading to an empty map on any failure.
    pub fn from_yaml_str(text: &str) -> Self {
        Self::try_from_yaml_str(text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring malformed configuration document");
            Self::empty("yaml".to_string())
        })
    }

    /// Parse YAML from a reader, degrading to an empty map on any failure.
    pub fn from_reader(mut reader: impl Read) -> Self {
        let mut text = String::new();
        match reader.read_to_string(&mut text) {
            Ok(_) => Self::from_yaml_str(&text),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable configuration document");
                Self::empty("yaml".to_string())
            }
        }
    }

    /// Parse a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its top level is not a
    /// mapping.
    pub fn try_from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let mut source = Self::try_from_yaml_str(&text)?;
        source.name = format!("yaml:{}", path.display());
        Ok(source)
    }

    /// Parse YAML text.
    ///
    /// Scalars keep the text they were written with (`1.10` stays `1.10`,
    /// `0x1F` stays `0x1F`), null becomes the empty string, and nested
    /// mappings or sequences are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not YAML or its top level is not a
    /// mapping.
    pub fn try_from_yaml_str(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::empty("yaml".to_string()));
        }

        // First pass classifies each value, second pass reads scalars as written.
        let shapes: Option<HashMap<String, Shape>> =
            serde_yaml::from_str(text).map_err(document_error)?;
        let Some(shapes) = shapes else {
            return Ok(Self::empty("yaml".to_string()));
        };

        let values = FlatDocument { shapes: &shapes }
            .deserialize(serde_yaml::Deserializer::from_str(text))
            .map_err(document_error)?;

        Ok(Self {
            name: "yaml".to_string(),
            values,
        })
    }

    /// Set the name reported by [`Source::name`].
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Number of keys held.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the map holds no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn empty(name: String) -> Self {
        Self {
            name,
            values: HashMap::new(),
        }
    }
}

impl Default for MapSource {
    fn default() -> Self {
        Self::from_map(HashMap::new())
    }
}

impl Source for MapSource {
    fn read(&self, key: &str) -> Result<Vec<u8>> {
        self.values
            .get(key)
            .map(|value| value.as_bytes().to_vec())
            .ok_or_else(|| ConfigError::not_found(key))
    }

    fn name(&self) -> String {
        self.name.clone()
    }
}

fn document_error(err: serde_yaml::Error) -> ConfigError {
    ConfigError::DocumentError(err.to_string())
}

/// What a top-level document value looks like, without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Null,
    Scalar,
    Nested(&'static str),
}

impl<'de> Deserialize<'de> for Shape {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(ShapeVisitor)
    }
}

struct ShapeVisitor;

impl<'de> Visitor<'de> for ShapeVisitor {
    type Value = Shape;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("any YAML value")
    }

    fn visit_bool<E: de::Error>(self, _: bool) -> std::result::Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_i64<E: de::Error>(self, _: i64) -> std::result::Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_u64<E: de::Error>(self, _: u64) -> std::result::Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_i128<E: de::Error>(self, _: i128) -> std::result::Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_u128<E: de::Error>(self, _: u128) -> std::result::Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_f64<E: de::Error>(self, _: f64) -> std::result::Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_str<E: de::Error>(self, _: &str) -> std::result::Result<Shape, E> {
        Ok(Shape::Scalar)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Shape, E> {
        Ok(Shape::Null)
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Shape, E> {
        Ok(Shape::Null)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Shape, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Shape, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Shape::Nested("sequence"))
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Shape, A::Error>
    where
        A: MapAccess<'de>,
    {
        while map.next_entry::<IgnoredAny, IgnoredAny>()?.is_some() {}
        Ok(Shape::Nested("mapping"))
    }

    // Values with a custom tag (`!secret abc`) arrive as enums.
    fn visit_enum<A>(self, data: A) -> std::result::Result<Shape, A::Error>
    where
        A: EnumAccess<'de>,
    {
        let (IgnoredAny, variant) = data.variant::<IgnoredAny>()?;
        variant.newtype_variant::<Shape>()
    }
}

/// Reads a top-level mapping into raw text, given the shape of each value.
struct FlatDocument<'a> {
    shapes: &'a HashMap<String, Shape>,
}

impl<'de> DeserializeSeed<'de> for FlatDocument<'_> {
    type Value = HashMap<String, String>;

    fn deserialize<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for FlatDocument<'_> {
    type Value = HashMap<String, String>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping at the top level")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut values = HashMap::with_capacity(self.shapes.len());
        while let Some(key) = map.next_key::<String>()? {
            match self.shapes.get(&key).copied().unwrap_or(Shape::Scalar) {
                Shape::Scalar => {
                    let text = map.next_value::<String>()?;
                    values.insert(key, text);
                }
                Shape::Null => {
                    map.next_value::<IgnoredAny>()?;
                    values.insert(key, String::new());
                }
                Shape::Nested(value_kind) => {
                    map.next_value::<IgnoredAny>()?;
                    tracing::warn!(%key, value_kind, "skipping nested document value");
                }
            }
        }
        Ok(values)
    }
}
