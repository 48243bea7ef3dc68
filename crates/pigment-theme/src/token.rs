//! Token values.

use pigment_config::{ConfigValue, ConfigValueKind, Scalar};
use serde::Serialize;
use std::fmt;

/// A resolved design value: a scalar (`50`, `25%`, `auto`) or an ordered list
/// of scalars (a font stack).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum TokenValue {
    Scalar(Scalar),
    List(Vec<Scalar>),
}

impl TokenValue {
    /// Validate a configured value as a token.
    ///
    /// On failure returns the reason, worded to follow "token `key` ".
    pub(crate) fn from_config(value: &ConfigValue) -> Result<Self, String> {
        match &value.value {
            ConfigValueKind::Scalar(scalar) => Ok(TokenValue::Scalar(scalar.clone())),
            ConfigValueKind::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    item.as_scalar().cloned().ok_or_else(|| {
                        format!("has a {} at list position {}; expected a scalar", item.type_name(), i)
                    })
                })
                .collect::<Result<Vec<_>, _>>()
                .map(TokenValue::List),
            ConfigValueKind::Map(_) => {
                Err("is a mapping; expected a scalar or a list of scalars".to_string())
            }
        }
    }

    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            TokenValue::Scalar(s) => Some(s),
            TokenValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Scalar]> {
        match self {
            TokenValue::List(items) => Some(items),
            TokenValue::Scalar(_) => None,
        }
    }
}

impl From<&str> for TokenValue {
    fn from(s: &str) -> Self {
        TokenValue::Scalar(Scalar::String(s.to_string()))
    }
}

impl From<i64> for TokenValue {
    fn from(i: i64) -> Self {
        TokenValue::Scalar(Scalar::Integer(i))
    }
}

impl fmt::Display for TokenValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenValue::Scalar(s) => write!(f, "{}", s),
            TokenValue::List(items) => {
                let parts: Vec<String> = items.iter().map(Scalar::to_key).collect();
                write!(f, "[{}]", parts.join(", "))
            }
        }
    }
}
