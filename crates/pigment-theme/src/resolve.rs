//! Theme resolution.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use pigment_config::{
    ConfigEntry, ConfigError, ConfigValue, MergeOp, last_write_wins, merge_tables,
};

use crate::preset::Preset;
use crate::token::TokenValue;
use crate::variant::{DEFAULT_VARIANTS, Variant};

/// Token key to value, in first-declaration order.
pub type TokenTable = IndexMap<String, TokenValue>;

/// One category of the final theme.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCategory {
    pub tokens: TokenTable,
    pub variants: Vec<Variant>,
}

/// The resolved theme handed to the utility-CSS engine.
///
/// A plain value: resolving identical inputs twice gives equal themes and
/// byte-identical JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FinalTheme {
    pub categories: IndexMap<String, ResolvedCategory>,
    pub plugins: Vec<String>,
}

impl FinalTheme {
    pub fn category(&self, name: &str) -> Option<&ResolvedCategory> {
        self.categories.get(name)
    }

    /// Look up a single token.
    pub fn token(&self, category: &str, key: &str) -> Option<&TokenValue> {
        self.categories.get(category)?.tokens.get(key)
    }

    /// Variants attached to a category, in generation order.
    pub fn variants(&self, category: &str) -> Option<&[Variant]> {
        self.categories.get(category).map(|c| c.variants.as_slice())
    }

    /// Plugin references in application order.
    pub fn plugins(&self) -> &[String] {
        &self.plugins
    }

    /// Category names in output order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Serialize to pretty-printed JSON. Key order follows the theme's
    /// category and token order.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Resolve a theme without a preset layer.
///
/// `base` and `extend` are category declarations (category name to a mapping
/// of tokens), `variants` maps category names to variant lists.
pub fn resolve(
    base: &[ConfigEntry],
    extend: &[ConfigEntry],
    variants: &[ConfigEntry],
    plugins: &[String],
) -> Result<FinalTheme, Vec<ConfigError>> {
    resolve_with_preset(&Preset::empty(), base, extend, variants, plugins)
}

/// Resolve a theme on top of `preset`.
///
/// Every malformed category and unknown variant is reported, not just the
/// first one found.
///
/// Order of the resulting categories: preset categories, then categories
/// first seen in `base`, then in `extend`, then categories that only have a
/// variant assignment.
pub fn resolve_with_preset(
    preset: &Preset,
    base: &[ConfigEntry],
    extend: &[ConfigEntry],
    variants: &[ConfigEntry],
    plugins: &[String],
) -> Result<FinalTheme, Vec<ConfigError>> {
    let mut errors = Vec::new();
    let base = collapse_categories(base, "base", &mut errors);
    let extend = collapse_categories(extend, "extend", &mut errors);
    let assignments = collapse_variants(variants, &mut errors);

    if !errors.is_empty() {
        debug!(errors = errors.len(), "theme resolution failed");
        return Err(errors);
    }

    let mut tables = preset.categories.clone();
    for (name, table) in base {
        if tables.contains_key(&name) {
            debug!(category = %name, "base category replaces preset");
        }
        apply_layer(&mut tables, name, table, MergeOp::Replace);
    }
    for (name, table) in extend {
        debug!(category = %name, tokens = table.len(), "extending category");
        apply_layer(&mut tables, name, table, MergeOp::Extend);
    }

    let mut categories: IndexMap<String, ResolvedCategory> = tables
        .into_iter()
        .map(|(name, tokens)| {
            let variants = assignments
                .get(&name)
                .cloned()
                .unwrap_or_else(|| DEFAULT_VARIANTS.to_vec());
            (name, ResolvedCategory { tokens, variants })
        })
        .collect();

    for (name, variants) in assignments {
        if !categories.contains_key(&name) {
            debug!(category = %name, "category has variants but no tokens");
            categories.insert(
                name,
                ResolvedCategory {
                    tokens: TokenTable::new(),
                    variants,
                },
            );
        }
    }

    debug!(
        categories = categories.len(),
        plugins = plugins.len(),
        "theme resolved"
    );

    Ok(FinalTheme {
        categories,
        plugins: plugins.to_vec(),
    })
}

fn apply_layer(
    tables: &mut IndexMap<String, TokenTable>,
    name: String,
    table: TokenTable,
    op: MergeOp,
) {
    match tables.get_mut(&name) {
        Some(existing) => {
            let lower = std::mem::take(existing);
            *existing = merge_tables(lower, table, op);
        }
        None => {
            tables.insert(name, table);
        }
    }
}

/// Validate every category of one layer and collapse repeated declarations.
///
/// Malformed categories are pushed onto `errors` and left out of the result.
pub(crate) fn collapse_categories(
    entries: &[ConfigEntry],
    layer: &str,
    errors: &mut Vec<ConfigError>,
) -> IndexMap<String, TokenTable> {
    let tables: Vec<(String, TokenTable)> = entries
        .iter()
        .filter_map(|entry| {
            token_table(&entry.key, &entry.value, errors).map(|table| (entry.key.clone(), table))
        })
        .collect();

    let (tables, overwritten) = last_write_wins(tables);
    for name in overwritten {
        warn!(layer, category = %name, "category declared more than once; later declaration wins");
    }
    tables
}

fn token_table(
    category: &str,
    value: &ConfigValue,
    errors: &mut Vec<ConfigError>,
) -> Option<TokenTable> {
    let Some(entries) = value.as_map() else {
        errors.push(ConfigError::MalformedCategory {
            category: category.to_string(),
            reason: format!("expected a mapping of tokens, found {}", value.type_name()),
            location: Some(value.source_info.clone()),
        });
        return None;
    };

    let before = errors.len();
    let mut tokens = Vec::with_capacity(entries.len());
    for entry in entries {
        match TokenValue::from_config(&entry.value) {
            Ok(token) => tokens.push((entry.key.clone(), token)),
            Err(reason) => errors.push(ConfigError::MalformedCategory {
                category: category.to_string(),
                reason: format!("token `{}` {}", entry.key, reason),
                location: Some(entry.value.source_info.clone()),
            }),
        }
    }
    if errors.len() > before {
        return None;
    }

    let (table, overwritten) = last_write_wins(tokens);
    for key in overwritten {
        warn!(category, token = %key, "duplicate token key; later declaration wins");
    }
    Some(table)
}

fn collapse_variants(
    entries: &[ConfigEntry],
    errors: &mut Vec<ConfigError>,
) -> IndexMap<String, Vec<Variant>> {
    let lists: Vec<(String, Vec<Variant>)> = entries
        .iter()
        .filter_map(|entry| variant_list(entry, errors).map(|list| (entry.key.clone(), list)))
        .collect();

    let (assignments, overwritten) = last_write_wins(lists);
    for name in overwritten {
        warn!(category = %name, "variants assigned more than once; later assignment wins");
    }
    assignments
}

fn variant_list(entry: &ConfigEntry, errors: &mut Vec<ConfigError>) -> Option<Vec<Variant>> {
    let items: Vec<&ConfigValue> = match entry.value.as_array() {
        Some(items) => items.iter().collect(),
        None => vec![&entry.value],
    };

    let before = errors.len();
    let mut variants = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        let name = match item.expect_str(&format!("variants.{}[{}]", entry.key, index)) {
            Ok(name) => name,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };
        match name.parse::<Variant>() {
            Ok(variant) => variants.push(variant),
            Err(_) => errors.push(ConfigError::UnknownVariant {
                category: entry.key.clone(),
                variant: name.to_string(),
                index,
                location: Some(item.source_info.clone()),
            }),
        }
    }
    (errors.len() == before).then_some(variants)
}
