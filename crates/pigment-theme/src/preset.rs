//! Preset token sets.

use indexmap::IndexMap;
use pigment_config::{ConfigEntry, ConfigError, Scalar};

use crate::resolve::{TokenTable, collapse_categories};
use crate::token::TokenValue;

/// Framework default tokens that sit below the configured `base` layer.
///
/// A category declared in `base` replaces the preset's category entirely.
/// Categories the configuration never mentions pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preset {
    pub(crate) categories: IndexMap<String, TokenTable>,
}

impl Preset {
    /// A preset with no categories. Resolving against it is the same as
    /// resolving without a preset.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in default token set.
    pub fn standard() -> Self {
        let mut categories = IndexMap::new();

        categories.insert(
            "fontFamily".to_string(),
            table([
                (
                    "sans",
                    list(&[
                        "system-ui",
                        "-apple-system",
                        "Segoe UI",
                        "Roboto",
                        "Helvetica Neue",
                        "Arial",
                        "sans-serif",
                    ]),
                ),
                ("serif", list(&["Georgia", "Cambria", "Times New Roman", "Times", "serif"])),
                ("mono", list(&["Menlo", "Monaco", "Consolas", "Liberation Mono", "monospace"])),
            ]),
        );

        categories.insert(
            "zIndex".to_string(),
            table([
                ("0", TokenValue::from(0)),
                ("10", TokenValue::from(10)),
                ("20", TokenValue::from(20)),
                ("30", TokenValue::from(30)),
                ("40", TokenValue::from(40)),
                ("50", TokenValue::from(50)),
                ("auto", TokenValue::from("auto")),
            ]),
        );

        categories.insert(
            "maxWidth".to_string(),
            table([
                ("sm", TokenValue::from("24rem")),
                ("md", TokenValue::from("28rem")),
                ("lg", TokenValue::from("32rem")),
                ("xl", TokenValue::from("36rem")),
                ("2xl", TokenValue::from("42rem")),
                ("3xl", TokenValue::from("48rem")),
                ("4xl", TokenValue::from("56rem")),
                ("5xl", TokenValue::from("64rem")),
                ("6xl", TokenValue::from("72rem")),
                ("full", TokenValue::from("100%")),
            ]),
        );

        Self { categories }
    }

    /// Build a preset from configured category entries.
    ///
    /// Categories are validated exactly like `base` categories. The first
    /// malformed category is returned.
    pub fn from_entries(entries: &[ConfigEntry]) -> Result<Self, ConfigError> {
        let mut errors = Vec::new();
        let categories = collapse_categories(entries, "preset", &mut errors);
        match errors.into_iter().next() {
            Some(error) => Err(error),
            None => Ok(Self { categories }),
        }
    }

    /// Look up a preset category by name.
    pub fn category(&self, name: &str) -> Option<&TokenTable> {
        self.categories.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

fn table<const N: usize>(tokens: [(&str, TokenValue); N]) -> TokenTable {
    tokens
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

fn list(items: &[&str]) -> TokenValue {
    TokenValue::List(items.iter().map(|s| Scalar::String(s.to_string())).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pigment_config::ConfigValue;

    #[test]
    fn test_standard_categories() {
        let preset = Preset::standard();
        let names: Vec<&str> = preset.categories.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["fontFamily", "zIndex", "maxWidth"]);

        let z_index = preset.category("zIndex").unwrap();
        assert_eq!(z_index.get("auto"), Some(&TokenValue::from("auto")));
        assert_eq!(z_index.get("50"), Some(&TokenValue::from(50)));

        let max_width = preset.category("maxWidth").unwrap();
        assert_eq!(max_width.first().map(|(k, _)| k.as_str()), Some("sm"));
        assert_eq!(max_width.get("full"), Some(&TokenValue::from("100%")));
    }

    #[test]
    fn test_empty_preset() {
        assert!(Preset::empty().is_empty());
        assert!(!Preset::standard().is_empty());
    }

    #[test]
    fn test_from_entries_validates_categories() {
        let root = ConfigValue::map([("spacing", ConfigValue::string("4px"))]);
        let err = Preset::from_entries(root.as_map().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::MalformedCategory { ref category, .. } if category == "spacing"));
    }
}
