//! Design-token theme resolution for pigment.
//!
//! Turns a declarative theme (token tables, `extend` fragments, variant lists
//! and plugin references) into a [`FinalTheme`]: one deterministic value a
//! utility-CSS engine can generate rules from.
//!
//! Layers, lowest first:
//!
//! 1. an optional [`Preset`] (the framework's default tokens),
//! 2. `base` categories, each of which replaces the preset's category
//!    wholesale,
//! 3. `extend` categories, merged key by key on top.
//!
//! Within any single table a repeated token key is overwritten by its later
//! declaration.
//!
//! # Example
//!
//! ```
//! use pigment_config::ConfigValue;
//! use pigment_theme::{ThemeConfig, Variant};
//!
//! let theme = ThemeConfig::new()
//!     .base_category("zIndex", ConfigValue::map([
//!         ("50", ConfigValue::integer(50)),
//!         ("50", ConfigValue::integer(75)),
//!     ]))
//!     .variants_for("zIndex", ["responsive", "hover"])
//!     .resolve()
//!     .unwrap();
//!
//! assert_eq!(theme.token("zIndex", "50").unwrap().to_string(), "75");
//! assert_eq!(theme.variants("zIndex"), Some(&[Variant::Responsive, Variant::Hover][..]));
//! ```

mod config;
mod preset;
mod resolve;
mod token;
mod variant;

pub use config::ThemeConfig;
pub use preset::Preset;
pub use resolve::{FinalTheme, ResolvedCategory, TokenTable, resolve, resolve_with_preset};
pub use token::TokenValue;
pub use variant::{DEFAULT_VARIANTS, UnknownVariantName, Variant};
