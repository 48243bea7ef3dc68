//! Configuration error taxonomy.

use pigment_error_reporting::{DiagnosticMessage, DiagnosticMessageBuilder, SourceInfo};
use thiserror::Error;

/// Errors detected while loading or validating a build configuration.
///
/// Everything except [`ConfigError::DuplicateOutputPath`] aborts resolution.
/// That one is a warning: the build continues and the later target wins.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Source text is not valid YAML.
    #[error("failed to parse configuration{}: {message}", .file.as_ref().map(|f| format!(" `{}`", f)).unwrap_or_default())]
    Parse {
        message: String,
        file: Option<String>,
    },

    /// A configuration section has the wrong shape.
    #[error("invalid configuration at `{path}`: expected {expected}, found {found}")]
    InvalidStructure {
        path: String,
        expected: String,
        found: String,
        location: Option<SourceInfo>,
    },

    /// A mode string other than `development` or `production`.
    #[error("invalid build mode `{value}`: expected `development` or `production`")]
    InvalidMode {
        value: String,
        location: Option<SourceInfo>,
    },

    /// A token category is not a mapping of scalar-or-list values.
    #[error("malformed category `{category}`: {reason}")]
    MalformedCategory {
        category: String,
        reason: String,
        location: Option<SourceInfo>,
    },

    /// A variant identifier outside the recognized set.
    #[error("unknown variant `{variant}` at position {index} of category `{category}`")]
    UnknownVariant {
        category: String,
        variant: String,
        index: usize,
        location: Option<SourceInfo>,
    },

    /// A loader rule references a mode-dependent slot but no mode is set.
    #[error("loader rule {rule_index} uses mode-dependent slot `{slot}` but no build mode is set")]
    AmbiguousMode { rule_index: usize, slot: String },

    /// A loader rule's match pattern does not compile.
    #[error("loader rule {rule_index} has an invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        rule_index: usize,
        pattern: String,
        message: String,
    },

    /// Two injection targets write the same output file.
    #[error("injection targets {first_index} and {second_index} both write `{output}`; target {second_index} wins")]
    DuplicateOutputPath {
        output: String,
        first_index: usize,
        second_index: usize,
    },
}

impl ConfigError {
    /// Stable error code from the catalog.
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::Parse { .. } => "P-1-1",
            ConfigError::InvalidStructure { .. } => "P-1-2",
            ConfigError::InvalidMode { .. } => "P-1-3",
            ConfigError::MalformedCategory { .. } => "P-2-1",
            ConfigError::UnknownVariant { .. } => "P-2-2",
            ConfigError::AmbiguousMode { .. } => "P-3-1",
            ConfigError::DuplicateOutputPath { .. } => "P-3-2",
            ConfigError::InvalidPattern { .. } => "P-3-3",
        }
    }

    /// Whether this error aborts resolution.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ConfigError::DuplicateOutputPath { .. })
    }

    /// Source location of the offending value, when it was loaded from text.
    pub fn location(&self) -> Option<&SourceInfo> {
        match self {
            ConfigError::InvalidStructure { location, .. }
            | ConfigError::InvalidMode { location, .. }
            | ConfigError::MalformedCategory { location, .. }
            | ConfigError::UnknownVariant { location, .. } => location.as_ref(),
            _ => None,
        }
    }

    /// Convert into a diagnostic message for the build driver.
    ///
    /// Title and problem statement come from the error catalog; this error's
    /// own message becomes the first detail.
    pub fn to_diagnostic(&self) -> DiagnosticMessage {
        let info = pigment_error_reporting::get_error_info(self.code());
        let title = info.map_or("Configuration Error", |info| info.title.as_str());

        let builder = if self.is_fatal() {
            DiagnosticMessageBuilder::error(title).add_detail(self.to_string())
        } else {
            DiagnosticMessageBuilder::warning(title).add_info(self.to_string())
        };
        let builder = match info {
            Some(info) => builder.problem(info.message_template.as_str()),
            None => builder,
        };
        let builder = builder
            .with_code(self.code())
            .at_optional_location(self.location().cloned());

        let builder = match self {
            ConfigError::UnknownVariant { .. } => builder.add_hint(
                "Use one of responsive, hover, focus, active, disabled, group-hover, focus-within?",
            ),
            ConfigError::AmbiguousMode { .. } => {
                builder.add_hint("Set `mode` to `development` or `production`?")
            }
            ConfigError::DuplicateOutputPath { .. } => {
                builder.add_note("Targets are written in declaration order")
            }
            _ => builder,
        };

        builder.build()
    }
}
