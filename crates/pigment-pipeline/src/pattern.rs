//! Asset match patterns.

use globset::{Glob, GlobMatcher};
use regex::Regex;
use serde::Serialize;

use pigment_config::ConfigError;

/// A match pattern as declared, before compilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternSpec {
    /// Regular expression tested against the whole asset identifier,
    /// including any `?query` suffix.
    Regex(String),
    /// File extensions, without the dot. Compared case-insensitively and
    /// ignoring any query or fragment suffix.
    Extensions(Vec<String>),
    /// Glob tested against the asset path with any query or fragment removed.
    Glob(String),
}

impl PatternSpec {
    pub fn regex(pattern: impl Into<String>) -> Self {
        PatternSpec::Regex(pattern.into())
    }

    pub fn extensions<S: Into<String>>(extensions: impl IntoIterator<Item = S>) -> Self {
        PatternSpec::Extensions(extensions.into_iter().map(Into::into).collect())
    }

    pub fn glob(pattern: impl Into<String>) -> Self {
        PatternSpec::Glob(pattern.into())
    }

    /// Source text, for messages.
    pub fn source(&self) -> String {
        match self {
            PatternSpec::Regex(s) | PatternSpec::Glob(s) => s.clone(),
            PatternSpec::Extensions(exts) => exts.join(","),
        }
    }

    /// Compile the pattern of rule `rule_index`.
    pub fn compile(&self, rule_index: usize) -> Result<MatchPattern, ConfigError> {
        let invalid = |message: String| ConfigError::InvalidPattern {
            rule_index,
            pattern: self.source(),
            message,
        };

        match self {
            PatternSpec::Regex(source) => Regex::new(source)
                .map(MatchPattern::Regex)
                .map_err(|e| invalid(e.to_string())),
            PatternSpec::Extensions(exts) => {
                if exts.is_empty() {
                    return Err(invalid("extension list is empty".to_string()));
                }
                Ok(MatchPattern::Extensions(
                    exts.iter()
                        .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                        .collect(),
                ))
            }
            PatternSpec::Glob(source) => Glob::new(source)
                .map(|glob| MatchPattern::Glob(glob.compile_matcher()))
                .map_err(|e| invalid(e.to_string())),
        }
    }
}

/// A compiled match pattern.
#[derive(Debug, Clone)]
pub enum MatchPattern {
    Regex(Regex),
    Extensions(Vec<String>),
    Glob(GlobMatcher),
}

impl MatchPattern {
    /// Test an asset identifier (`./img/logo.svg`, `fonts/a.woff2?v=3`).
    pub fn matches(&self, asset: &str) -> bool {
        match self {
            MatchPattern::Regex(regex) => regex.is_match(asset),
            MatchPattern::Extensions(exts) => extension_of(strip_suffix(asset))
                .is_some_and(|ext| exts.iter().any(|e| e.eq_ignore_ascii_case(ext))),
            MatchPattern::Glob(matcher) => matcher.is_match(strip_suffix(asset)),
        }
    }
}

/// Drop a `?query` or `#fragment` suffix.
fn strip_suffix(asset: &str) -> &str {
    match asset.find(['?', '#']) {
        Some(pos) => &asset[..pos],
        None => asset,
    }
}

fn extension_of(path: &str) -> Option<&str> {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => None,
        Some(pos) => Some(&name[pos + 1..]),
    }
}
