//! YAML loading that keeps declaration order and duplicate keys.
//!
//! yaml-rust2's document loader collapses mappings into a hash, which would
//! silently drop the first of two identical keys. Building the tree from the
//! parser's event stream instead keeps every entry, so merge rules can decide
//! what a repeated key means.

use tracing::debug;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::error::ConfigError;
use crate::value::{ConfigEntry, ConfigValue, Scalar};
use pigment_error_reporting::SourceInfo;

/// Parse YAML text into a [`ConfigValue`].
///
/// Only the first document is read. Empty input yields a null value.
///
/// # Example
///
/// ```
/// use pigment_config::parse;
///
/// let value = parse("plugins: [forms, line-clamp]").unwrap();
/// let plugins = value.get("plugins").unwrap().expect_string_list("plugins").unwrap();
/// assert_eq!(plugins, vec!["forms", "line-clamp"]);
/// ```
pub fn parse(content: &str) -> Result<ConfigValue, ConfigError> {
    parse_impl(content, None)
}

/// Parse YAML text, recording `filename` in every value's source location.
pub fn parse_file(content: &str, filename: &str) -> Result<ConfigValue, ConfigError> {
    parse_impl(content, Some(filename))
}

fn parse_impl(content: &str, filename: Option<&str>) -> Result<ConfigValue, ConfigError> {
    let mut parser = Parser::new_from_str(content);
    let mut builder = ValueBuilder::new(filename);

    parser
        .load(&mut builder, false) // single document only
        .map_err(|e| ConfigError::Parse {
            message: e.to_string(),
            file: filename.map(str::to_string),
        })?;

    let value = builder.finish()?;
    debug!(file = ?filename, kind = value.type_name(), "configuration parsed");
    Ok(value)
}

/// Event receiver that assembles a `ConfigValue` tree.
struct ValueBuilder {
    filename: Option<String>,
    stack: Vec<BuildNode>,
    root: Option<ConfigValue>,
    /// First structural error seen; events keep flowing after it.
    error: Option<ConfigError>,
}

/// A container being constructed during parsing.
enum BuildNode {
    Sequence {
        start: SourceInfo,
        items: Vec<ConfigValue>,
    },
    Mapping {
        start: SourceInfo,
        entries: Vec<(ConfigValue, Option<ConfigValue>)>,
    },
}

impl ValueBuilder {
    fn new(filename: Option<&str>) -> Self {
        Self {
            filename: filename.map(str::to_string),
            stack: Vec::new(),
            root: None,
            error: None,
        }
    }

    fn finish(self) -> Result<ConfigValue, ConfigError> {
        if let Some(error) = self.error {
            return Err(error);
        }
        Ok(self.root.unwrap_or_else(|| {
            let mut source_info = SourceInfo::default();
            source_info.file = self.filename.clone();
            ConfigValue::null(source_info)
        }))
    }

    fn source_info(&self, marker: &Marker, len: usize) -> SourceInfo {
        SourceInfo::new(
            self.filename.clone(),
            marker.index(),
            marker.line(),
            marker.col() + 1, // yaml-rust2 columns are 0-based
            len,
        )
    }

    /// Whether the next complete node is a mapping key.
    fn expects_key(&self) -> bool {
        match self.stack.last() {
            Some(BuildNode::Mapping { entries, .. }) => !matches!(entries.last(), Some((_, None))),
            _ => false,
        }
    }

    fn fail(&mut self, error: ConfigError) {
        if self.error.is_none() {
            self.error = Some(error);
        }
    }

    fn push_complete(&mut self, node: ConfigValue) {
        match self.stack.last_mut() {
            None => self.root = Some(node),
            Some(BuildNode::Sequence { items, .. }) => items.push(node),
            Some(BuildNode::Mapping { entries, .. }) => match entries.last_mut() {
                Some((_, value @ None)) => *value = Some(node),
                _ => entries.push((node, None)),
            },
        }
    }

    fn close_mapping(
        &mut self,
        start: SourceInfo,
        end: &Marker,
        raw: Vec<(ConfigValue, Option<ConfigValue>)>,
    ) -> ConfigValue {
        let mut entries = Vec::with_capacity(raw.len());
        for (key, value) in raw {
            let Some(scalar) = key.as_scalar() else {
                self.fail(ConfigError::InvalidStructure {
                    path: "<mapping key>".to_string(),
                    expected: "a scalar key".to_string(),
                    found: key.type_name().to_string(),
                    location: Some(key.source_info.clone()),
                });
                continue;
            };
            let value = value.unwrap_or_else(|| ConfigValue::null(key.source_info.clone()));
            entries.push(ConfigEntry {
                key: scalar.to_key(),
                key_source: key.source_info.clone(),
                value,
            });
        }

        let mut source_info = start;
        source_info.len = end.index().saturating_sub(source_info.offset);
        ConfigValue::new_map(entries, source_info)
    }
}

impl MarkedEventReceiver for ValueBuilder {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing
            | Event::StreamStart
            | Event::StreamEnd
            | Event::DocumentStart
            | Event::DocumentEnd => {}

            Event::Scalar(value, style, _anchor_id, _tag) => {
                let source_info = self.source_info(&marker, value.chars().count());
                // Keys keep their text as written, so `010` and `10` stay apart.
                let scalar = if matches!(style, TScalarStyle::Plain) && !self.expects_key() {
                    parse_plain_scalar(&value)
                } else {
                    Scalar::String(value)
                };
                self.push_complete(ConfigValue::new_scalar(scalar, source_info));
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                let start = self.source_info(&marker, 0);
                self.stack.push(BuildNode::Sequence {
                    start,
                    items: Vec::new(),
                });
            }

            Event::MappingStart(_anchor_id, _tag) => {
                let start = self.source_info(&marker, 0);
                self.stack.push(BuildNode::Mapping {
                    start,
                    entries: Vec::new(),
                });
            }

            Event::SequenceEnd => match self.stack.pop() {
                Some(BuildNode::Sequence { mut start, items }) => {
                    start.len = marker.index().saturating_sub(start.offset);
                    self.push_complete(ConfigValue::new_array(items, start));
                }
                _ => self.fail(ConfigError::Parse {
                    message: "unbalanced sequence end".to_string(),
                    file: self.filename.clone(),
                }),
            },

            Event::MappingEnd => match self.stack.pop() {
                Some(BuildNode::Mapping { start, entries }) => {
                    let node = self.close_mapping(start, &marker, entries);
                    self.push_complete(node);
                }
                _ => self.fail(ConfigError::Parse {
                    message: "unbalanced mapping end".to_string(),
                    file: self.filename.clone(),
                }),
            },

            Event::Alias(_anchor_id) => {
                let location = self.source_info(&marker, 0);
                self.fail(ConfigError::Parse {
                    message: format!("YAML aliases are not supported (at {})", location),
                    file: self.filename.clone(),
                });
                self.push_complete(ConfigValue::null(location));
            }
        }
    }
}

/// Infer the type of an unquoted scalar: integer, real, boolean, null or string.
fn parse_plain_scalar(value: &str) -> Scalar {
    if let Ok(i) = value.parse::<i64>() {
        return Scalar::Integer(i);
    }

    if value.parse::<f64>().is_ok() {
        return Scalar::Real(value.to_string());
    }

    match value {
        "true" | "True" | "TRUE" | "yes" | "Yes" | "YES" | "on" | "On" | "ON" => {
            Scalar::Boolean(true)
        }
        "false" | "False" | "FALSE" | "no" | "No" | "NO" | "off" | "Off" | "OFF" => {
            Scalar::Boolean(false)
        }
        "null" | "Null" | "NULL" | "~" | "" => Scalar::Null,
        _ => Scalar::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse("42").unwrap().as_i64(), Some(42));
        assert_eq!(parse("hello").unwrap().as_str(), Some("hello"));
        assert_eq!(
            parse("0.5").unwrap().as_scalar(),
            Some(&Scalar::Real("0.5".into()))
        );
        assert!(parse("~").unwrap().is_null());
    }

    #[test]
    fn test_quoted_scalars_stay_strings() {
        let value = parse("a: '50'\nb: \"true\"").unwrap();
        assert_eq!(value.get("a").unwrap().as_str(), Some("50"));
        assert_eq!(value.get("b").unwrap().as_str(), Some("true"));
    }

    #[test]
    fn test_duplicate_keys_are_preserved_in_order() {
        let value = parse(
            r#"
zIndex:
  '40': 40
  '50': 50
  '25': 25
  '50': 75
"#,
        )
        .unwrap();

        let entries = value.get("zIndex").unwrap().as_map().unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["40", "50", "25", "50"]);
        assert_eq!(entries[1].value.as_i64(), Some(50));
        assert_eq!(entries[3].value.as_i64(), Some(75));
    }

    #[test]
    fn test_keys_keep_written_text() {
        let value = parse("zIndex:\n  010: a\n  10: b\n  +10: c\n  1.50: d\n  yes: e\n").unwrap();

        let entries = value.get("zIndex").unwrap().as_map().unwrap();
        let keys: Vec<&str> = entries.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys, vec!["010", "10", "+10", "1.50", "yes"]);

        // Values are still typed.
        assert_eq!(entries[1].value.as_scalar(), Some(&Scalar::String("b".into())));
        assert_eq!(parse("a: 010").unwrap().get("a").unwrap().as_i64(), Some(10));
    }

    #[test]
    fn test_nested_structure() {
        let value = parse(
            r#"
theme:
  extend:
    fontFamily:
      sans: [Inter var, system-ui]
"#,
        )
        .unwrap();

        let sans = value
            .get("theme")
            .and_then(|t| t.get("extend"))
            .and_then(|e| e.get("fontFamily"))
            .and_then(|f| f.get("sans"))
            .unwrap();
        assert_eq!(
            sans.expect_string_list("sans").unwrap(),
            vec!["Inter var", "system-ui"]
        );
    }

    #[test]
    fn test_source_info_tracking() {
        let value = parse_file("theme:\n  zIndex:\n    auto: auto\n", "pigment.yaml").unwrap();
        let theme = value.get("theme").unwrap();
        let z_index = theme.get("zIndex").unwrap();

        assert_eq!(z_index.source_info.file.as_deref(), Some("pigment.yaml"));
        assert!(z_index.source_info.line > theme.source_info.line);

        let entry = &z_index.as_map().unwrap()[0];
        assert!(entry.key_source.line > theme.source_info.line);
        assert!(entry.key_source.col > 1);
    }

    #[test]
    fn test_empty_document_is_null() {
        assert!(parse("").unwrap().is_null());
    }

    #[test]
    fn test_syntax_error() {
        let err = parse_file("a: [1, 2", "broken.yaml").unwrap_err();
        match err {
            ConfigError::Parse { file, .. } => assert_eq!(file.as_deref(), Some("broken.yaml")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_aliases_rejected() {
        let err = parse("base: &b {a: 1}\ncopy: *b\n").unwrap_err();
        assert!(err.to_string().contains("aliases are not supported"));
    }

    #[test]
    fn test_complex_key_rejected() {
        let err = parse("? [a, b]\n: 1\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidStructure { .. }));
    }
}
