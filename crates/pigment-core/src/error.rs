//! Build failure.

use pigment_config::ConfigError;
use pigment_error_reporting::{DiagnosticMessage, SourceContext};

use crate::session::BuildState;

/// A resolution attempt that stopped during validation.
///
/// Carries every fatal error that was found. There is no way back to a
/// session from here; fix the configuration and start a new one.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildFailure {
    pub errors: Vec<ConfigError>,
    /// Non-fatal problems found before validation stopped.
    pub warnings: Vec<ConfigError>,
    /// Text of the configuration the errors point into.
    pub source_context: SourceContext,
}

impl BuildFailure {
    /// The state the attempt ended in.
    pub fn state(&self) -> BuildState {
        BuildState::Validating
    }

    /// Errors first, then warnings.
    pub fn diagnostics(&self) -> Vec<DiagnosticMessage> {
        self.errors
            .iter()
            .chain(&self.warnings)
            .map(ConfigError::to_diagnostic)
            .collect()
    }

    /// Render every diagnostic as text, separated by blank lines.
    ///
    /// Located errors quote the configuration line they point at.
    pub fn render(&self) -> String {
        self.diagnostics()
            .iter()
            .map(|d| d.to_text(Some(&self.source_context)))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl std::fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let plural = if self.errors.len() == 1 { "" } else { "s" };
        write!(
            f,
            "build configuration is invalid ({} error{})",
            self.errors.len(),
            plural
        )
    }
}

impl std::error::Error for BuildFailure {}
