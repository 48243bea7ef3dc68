//! Theme configuration extraction from ConfigValue.
//!
//! The theme lives at the top level of a build document:
//!
//! ```yaml
//! preset: standard          # optional; `none`, `standard` or a category mapping
//! theme:
//!   zIndex: {'10': 10, auto: auto}
//!   extend:
//!     fontFamily: {sans: [Inter var, sans-serif]}
//! variants:
//!   backgroundColor: [responsive, hover, focus]
//! plugins: [forms]
//! ```
//!
//! Every key of `theme` other than `extend` is a base category.

use pigment_config::{ConfigEntry, ConfigError, ConfigValue, SourceInfo};

use crate::preset::Preset;
use crate::resolve::{FinalTheme, resolve_with_preset};

/// Unresolved theme inputs, as declared.
///
/// Declarations are kept in order with duplicates, so resolution applies
/// last-write-wins the same way regardless of where the config came from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeConfig {
    pub preset: Preset,
    pub base: Vec<ConfigEntry>,
    pub extend: Vec<ConfigEntry>,
    pub variants: Vec<ConfigEntry>,
    pub plugins: Vec<String>,
}

impl ThemeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.preset = preset;
        self
    }

    /// Declare a base category.
    pub fn base_category(mut self, name: impl Into<String>, tokens: ConfigValue) -> Self {
        self.base.push(entry(name, tokens));
        self
    }

    /// Declare an `extend` category.
    pub fn extend_category(mut self, name: impl Into<String>, tokens: ConfigValue) -> Self {
        self.extend.push(entry(name, tokens));
        self
    }

    /// Assign variants to a category. Identifiers are checked at resolution.
    pub fn variants_for<S: Into<String>>(
        mut self,
        category: impl Into<String>,
        variants: impl IntoIterator<Item = S>,
    ) -> Self {
        self.variants.push(entry(category, ConfigValue::strings(variants)));
        self
    }

    pub fn plugin(mut self, name: impl Into<String>) -> Self {
        self.plugins.push(name.into());
        self
    }

    /// Resolve into a [`FinalTheme`], or every error that prevents it.
    pub fn resolve(&self) -> Result<FinalTheme, Vec<ConfigError>> {
        resolve_with_preset(
            &self.preset,
            &self.base,
            &self.extend,
            &self.variants,
            &self.plugins,
        )
    }

    /// Extract the theme sections of a build document.
    ///
    /// Absent or null sections fall back to empty defaults. A section with the
    /// wrong shape is an `InvalidStructure` error.
    pub fn from_config_value(root: &ConfigValue) -> Result<Self, ConfigError> {
        if root.is_null() {
            return Ok(Self::default());
        }
        root.expect_map("<root>")?;

        let mut config = Self::new();

        if let Some(preset) = present(root.get("preset")) {
            config.preset = extract_preset(preset)?;
        }

        if let Some(theme) = present(root.get("theme")) {
            for item in theme.expect_map("theme")? {
                if item.key == "extend" {
                    if !item.value.is_null() {
                        let extend = item.value.expect_map("theme.extend")?;
                        config.extend.extend(extend.iter().cloned());
                    }
                } else {
                    config.base.push(item.clone());
                }
            }
        }

        if let Some(variants) = present(root.get("variants")) {
            config.variants = variants.expect_map("variants")?.to_vec();
        }

        if let Some(plugins) = present(root.get("plugins")) {
            config.plugins = plugins.expect_string_list("plugins")?;
        }

        Ok(config)
    }
}

fn present(value: Option<&ConfigValue>) -> Option<&ConfigValue> {
    value.filter(|v| !v.is_null())
}

fn extract_preset(value: &ConfigValue) -> Result<Preset, ConfigError> {
    if let Some(entries) = value.as_map() {
        return Preset::from_entries(entries);
    }
    match value.as_str() {
        Some("standard") => Ok(Preset::standard()),
        Some("none") => Ok(Preset::empty()),
        _ => Err(value.structure_error("preset", "`standard`, `none` or a mapping of categories")),
    }
}

fn entry(key: impl Into<String>, value: ConfigValue) -> ConfigEntry {
    ConfigEntry {
        key: key.into(),
        key_source: SourceInfo::default(),
        value,
    }
}
