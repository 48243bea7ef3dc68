//! Core configuration value types.

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::ConfigError;
use pigment_error_reporting::SourceInfo;

/// An atomic configuration value.
///
/// Reals keep their source text so values compare and hash exactly and
/// serialize back without float formatting drift.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Scalar {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(String),
    String(String),
}

impl Scalar {
    /// Render the scalar as a mapping key (`50`, `auto`, `1/4`).
    pub fn to_key(&self) -> String {
        match self {
            Scalar::Null => "null".to_string(),
            Scalar::Boolean(b) => b.to_string(),
            Scalar::Integer(i) => i.to_string(),
            Scalar::Real(r) => r.clone(),
            Scalar::String(s) => s.clone(),
        }
    }

    fn type_name(&self) -> &'static str {
        match self {
            Scalar::Null => "null",
            Scalar::Boolean(_) => "boolean",
            Scalar::Integer(_) => "integer",
            Scalar::Real(_) => "real",
            Scalar::String(_) => "string",
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_key())
    }
}

impl Serialize for Scalar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Scalar::Null => serializer.serialize_unit(),
            Scalar::Boolean(b) => serializer.serialize_bool(*b),
            Scalar::Integer(i) => serializer.serialize_i64(*i),
            Scalar::Real(r) => match r.parse::<f64>() {
                Ok(f) if f.is_finite() => serializer.serialize_f64(f),
                _ => serializer.serialize_str(r),
            },
            Scalar::String(s) => serializer.serialize_str(s),
        }
    }
}

/// A single `key: value` pair of a map, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigEntry {
    pub key: String,
    pub key_source: SourceInfo,
    pub value: ConfigValue,
}

/// The kind of configuration value.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValueKind {
    Scalar(Scalar),
    Array(Vec<ConfigValue>),
    /// Entries in declaration order. Duplicate keys are kept.
    Map(Vec<ConfigEntry>),
}

/// A configuration value with the location it was declared at.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigValue {
    pub value: ConfigValueKind,
    pub source_info: SourceInfo,
}

impl ConfigValue {
    /// Create a scalar value.
    pub fn new_scalar(scalar: Scalar, source_info: SourceInfo) -> Self {
        Self {
            value: ConfigValueKind::Scalar(scalar),
            source_info,
        }
    }

    /// Create an array value.
    pub fn new_array(items: Vec<ConfigValue>, source_info: SourceInfo) -> Self {
        Self {
            value: ConfigValueKind::Array(items),
            source_info,
        }
    }

    /// Create a map value from ordered entries.
    pub fn new_map(entries: Vec<ConfigEntry>, source_info: SourceInfo) -> Self {
        Self {
            value: ConfigValueKind::Map(entries),
            source_info,
        }
    }

    /// Create a null value.
    pub fn null(source_info: SourceInfo) -> Self {
        Self::new_scalar(Scalar::Null, source_info)
    }

    /// Build a map without source locations, keeping duplicate keys.
    ///
    /// ```
    /// use pigment_config::ConfigValue;
    ///
    /// let z = ConfigValue::map([
    ///     ("50", ConfigValue::integer(50)),
    ///     ("50", ConfigValue::integer(75)),
    /// ]);
    /// assert_eq!(z.as_map().unwrap().len(), 2);
    /// assert_eq!(z.get("50").and_then(|v| v.as_i64()), Some(75));
    /// ```
    pub fn map<K: Into<String>>(entries: impl IntoIterator<Item = (K, ConfigValue)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(key, value)| ConfigEntry {
                key: key.into(),
                key_source: SourceInfo::default(),
                value,
            })
            .collect();
        Self::new_map(entries, SourceInfo::default())
    }

    /// Build an array without source locations.
    pub fn array(items: impl IntoIterator<Item = ConfigValue>) -> Self {
        Self::new_array(items.into_iter().collect(), SourceInfo::default())
    }

    /// Build a string scalar without a source location.
    pub fn string(s: impl Into<String>) -> Self {
        Self::new_scalar(Scalar::String(s.into()), SourceInfo::default())
    }

    /// Build an integer scalar without a source location.
    pub fn integer(i: i64) -> Self {
        Self::new_scalar(Scalar::Integer(i), SourceInfo::default())
    }

    /// Build a boolean scalar without a source location.
    pub fn boolean(b: bool) -> Self {
        Self::new_scalar(Scalar::Boolean(b), SourceInfo::default())
    }

    /// Build an array of strings without source locations.
    pub fn strings<S: Into<String>>(items: impl IntoIterator<Item = S>) -> Self {
        Self::array(items.into_iter().map(ConfigValue::string))
    }

    pub fn is_null(&self) -> bool {
        matches!(self.value, ConfigValueKind::Scalar(Scalar::Null))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self.value, ConfigValueKind::Scalar(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.value, ConfigValueKind::Array(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.value, ConfigValueKind::Map(_))
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match &self.value {
            ConfigValueKind::Scalar(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[ConfigValue]> {
        match &self.value {
            ConfigValueKind::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&[ConfigEntry]> {
        match &self.value {
            ConfigValueKind::Map(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            ConfigValueKind::Scalar(Scalar::String(s)) => Some(s),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match &self.value {
            ConfigValueKind::Scalar(Scalar::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Look up a map key. When the key is declared more than once the last
    /// declaration is returned.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.as_map()?
            .iter()
            .rev()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.value)
    }

    /// Human-readable name of this value's shape, for error messages.
    pub fn type_name(&self) -> &'static str {
        match &self.value {
            ConfigValueKind::Scalar(s) => s.type_name(),
            ConfigValueKind::Array(_) => "list",
            ConfigValueKind::Map(_) => "mapping",
        }
    }

    // Typed extraction helpers. `path` names the value in error messages.

    /// Require a map, returning its entries.
    pub fn expect_map(&self, path: &str) -> Result<&[ConfigEntry], ConfigError> {
        self.as_map()
            .ok_or_else(|| self.structure_error(path, "a mapping"))
    }

    /// Require a string scalar.
    pub fn expect_str(&self, path: &str) -> Result<&str, ConfigError> {
        self.as_str()
            .ok_or_else(|| self.structure_error(path, "a string"))
    }

    /// Require a list of strings. A single string is accepted as a
    /// one-element list.
    pub fn expect_string_list(&self, path: &str) -> Result<Vec<String>, ConfigError> {
        if let Some(s) = self.as_str() {
            return Ok(vec![s.to_string()]);
        }
        let items = self
            .as_array()
            .ok_or_else(|| self.structure_error(path, "a list of strings"))?;
        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.expect_str(&format!("{}[{}]", path, i))
                    .map(str::to_string)
            })
            .collect()
    }

    /// Build an `InvalidStructure` error pointing at this value.
    pub fn structure_error(&self, path: &str, expected: &str) -> ConfigError {
        ConfigError::InvalidStructure {
            path: path.to_string(),
            expected: expected.to_string(),
            found: self.type_name().to_string(),
            location: Some(self.source_info.clone()),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(s: &str) -> Self {
        ConfigValue::string(s)
    }
}

impl From<String> for ConfigValue {
    fn from(s: String) -> Self {
        ConfigValue::string(s)
    }
}
