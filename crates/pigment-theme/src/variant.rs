//! Utility variants.

use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A conditional state the CSS engine generates a separate rule for.
///
/// The set is closed: an identifier outside it would reach the engine and
/// produce silently wrong output, so parsing rejects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Variant {
    Responsive,
    Hover,
    Focus,
    Active,
    Disabled,
    GroupHover,
    FocusWithin,
}

/// Variants attached to a category that has no explicit assignment.
pub const DEFAULT_VARIANTS: &[Variant] = &[Variant::Responsive];

impl Variant {
    /// Every recognized variant, in canonical order.
    pub const ALL: [Variant; 7] = [
        Variant::Responsive,
        Variant::Hover,
        Variant::Focus,
        Variant::Active,
        Variant::Disabled,
        Variant::GroupHover,
        Variant::FocusWithin,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Variant::Responsive => "responsive",
            Variant::Hover => "hover",
            Variant::Focus => "focus",
            Variant::Active => "active",
            Variant::Disabled => "disabled",
            Variant::GroupHover => "group-hover",
            Variant::FocusWithin => "focus-within",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an identifier is not a recognized variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariantName(pub String);

impl FromStr for Variant {
    type Err = UnknownVariantName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Variant::ALL
            .iter()
            .copied()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariantName(s.to_string()))
    }
}

impl Serialize for Variant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
