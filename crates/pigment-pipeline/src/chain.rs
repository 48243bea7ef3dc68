//! Loader rules and transform-chain selection.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

use pigment_config::{ConfigError, Mode};

use crate::pattern::{MatchPattern, PatternSpec};

/// A loader rule as declared: a pattern and the transforms it applies.
///
/// A transform identifier that names a [`ModeOverride`] slot is a
/// placeholder, substituted according to the build mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSpec {
    pub pattern: PatternSpec,
    pub transforms: Vec<String>,
}

impl RuleSpec {
    pub fn new<S: Into<String>>(pattern: PatternSpec, transforms: impl IntoIterator<Item = S>) -> Self {
        Self {
            pattern,
            transforms: transforms.into_iter().map(Into::into).collect(),
        }
    }

    /// Compile the pattern. `index` is the rule's declaration position.
    pub fn compile(&self, index: usize) -> Result<LoaderRule, ConfigError> {
        Ok(LoaderRule {
            index,
            pattern: self.pattern.compile(index)?,
            transforms: self.transforms.clone(),
        })
    }
}

/// A compiled loader rule.
#[derive(Debug, Clone)]
pub struct LoaderRule {
    pub index: usize,
    pub pattern: MatchPattern,
    pub transforms: Vec<String>,
}

/// The two alternatives for a mode-dependent transform slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeOverride {
    /// Lower latency, e.g. inline style injection.
    pub development: String,
    /// Optimizing, e.g. extraction into a separate stylesheet.
    pub production: String,
}

impl ModeOverride {
    pub fn new(development: impl Into<String>, production: impl Into<String>) -> Self {
        Self {
            development: development.into(),
            production: production.into(),
        }
    }

    pub fn for_mode(&self, mode: Mode) -> &str {
        match mode {
            Mode::Development => &self.development,
            Mode::Production => &self.production,
        }
    }
}

/// Slot name to its mode-dependent alternatives.
pub type ModeOverrides = IndexMap<String, ModeOverride>;

/// The transforms applied to one asset, slots already substituted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransformChain {
    /// Declaration index of the rule that produced this chain.
    pub rule_index: usize,
    pub transforms: Vec<String>,
}

impl TransformChain {
    pub fn contains(&self, transform: &str) -> bool {
        self.transforms.iter().any(|t| t == transform)
    }
}

/// Outcome of chain selection for one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChainResolution {
    Chain(TransformChain),
    /// No rule matched; the bundler passes the asset through untouched.
    NoMatch,
}

impl ChainResolution {
    pub fn chain(&self) -> Option<&TransformChain> {
        match self {
            ChainResolution::Chain(chain) => Some(chain),
            ChainResolution::NoMatch => None,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, ChainResolution::Chain(_))
    }
}

/// Select the transform chain for `asset`.
///
/// Rules are tested in declaration order and the first match wins. Its
/// transforms go through [`substitute_slots`]. No match is not an error.
pub fn resolve_chain(
    mode: Option<Mode>,
    rules: &[LoaderRule],
    overrides: &ModeOverrides,
    asset: &str,
) -> Result<ChainResolution, ConfigError> {
    let Some(rule) = rules.iter().find(|rule| rule.pattern.matches(asset)) else {
        debug!(asset, "no loader rule matched");
        return Ok(ChainResolution::NoMatch);
    };

    let chain = substitute_slots(mode, rule, overrides)?;
    debug!(asset, rule = rule.index, transforms = ?chain.transforms, "loader rule matched");
    Ok(ChainResolution::Chain(chain))
}

/// Replace every mode-dependent slot of `rule` with the alternative for
/// `mode`.
///
/// Fails with `AmbiguousMode` when the rule names a slot and `mode` is
/// `None`.
pub fn substitute_slots(
    mode: Option<Mode>,
    rule: &LoaderRule,
    overrides: &ModeOverrides,
) -> Result<TransformChain, ConfigError> {
    let transforms = rule
        .transforms
        .iter()
        .map(|transform| match overrides.get(transform) {
            None => Ok(transform.clone()),
            Some(choice) => {
                let mode = mode.ok_or_else(|| ConfigError::AmbiguousMode {
                    rule_index: rule.index,
                    slot: transform.clone(),
                })?;
                Ok(choice.for_mode(mode).to_string())
            }
        })
        .collect::<Result<Vec<_>, ConfigError>>()?;

    Ok(TransformChain {
        rule_index: rule.index,
        transforms,
    })
}
