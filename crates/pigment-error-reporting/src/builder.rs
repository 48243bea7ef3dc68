//! Builder API for diagnostic messages.
//!
//! The builder encodes the tidyverse message structure: a title, one problem
//! statement, bulleted details, and hints.

use crate::diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
use crate::source_info::SourceInfo;

/// Builder for creating diagnostic messages following tidyverse guidelines.
///
/// # Example
///
/// ```
/// use pigment_error_reporting::DiagnosticMessageBuilder;
///
/// let error = DiagnosticMessageBuilder::error("Malformed token category")
///     .with_code("P-2-1")
///     .problem("Category `zIndex` must be a mapping")
///     .add_detail("Found a list instead")
///     .add_hint("Write `zIndex:` as `key: value` pairs?")
///     .build();
///
/// assert_eq!(error.code, Some("P-2-1".to_string()));
/// assert_eq!(error.details.len(), 1);
/// assert_eq!(error.hints.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DiagnosticMessageBuilder {
    kind: DiagnosticKind,
    title: String,
    code: Option<String>,
    problem: Option<String>,
    details: Vec<DetailItem>,
    hints: Vec<String>,
    location: Option<SourceInfo>,
}

impl DiagnosticMessageBuilder {
    fn new(kind: DiagnosticKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            code: None,
            problem: None,
            details: Vec::new(),
            hints: Vec::new(),
            location: None,
        }
    }

    /// Create an error diagnostic builder.
    pub fn error(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Error, title)
    }

    /// Create a warning diagnostic builder.
    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Warning, title)
    }

    /// Set the error code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Set the problem statement.
    ///
    /// Calling this twice replaces the earlier statement.
    pub fn problem(mut self, problem: impl Into<String>) -> Self {
        self.problem = Some(problem.into());
        self
    }

    /// Add an error detail (✖ bullet).
    pub fn add_detail(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Error, content.into())
    }

    /// Add an info detail (ℹ bullet).
    pub fn add_info(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Info, content.into())
    }

    /// Add a note detail (• bullet).
    pub fn add_note(self, content: impl Into<String>) -> Self {
        self.push_detail(DetailKind::Note, content.into())
    }

    /// Add a hint. Hints should end with a question mark.
    pub fn add_hint(mut self, hint: impl Into<String>) -> Self {
        self.hints.push(hint.into());
        self
    }

    /// Attach the main source location if one is known.
    pub fn at_optional_location(mut self, location: Option<SourceInfo>) -> Self {
        self.location = location;
        self
    }

    /// Build the diagnostic message.
    pub fn build(self) -> DiagnosticMessage {
        DiagnosticMessage {
            code: self.code,
            title: self.title,
            kind: self.kind,
            problem: self.problem,
            details: self.details,
            hints: self.hints,
            location: self.location,
        }
    }

    fn push_detail(mut self, kind: DetailKind, content: String) -> Self {
        self.details.push(DetailItem { kind, content });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_basic() {
        let msg = DiagnosticMessageBuilder::error("Test error").build();
        assert_eq!(msg.kind, DiagnosticKind::Error);
        assert_eq!(msg.title, "Test error");
        assert!(msg.problem.is_none());
        assert!(msg.details.is_empty());
    }

    #[test]
    fn test_builder_detail_kinds() {
        let msg = DiagnosticMessageBuilder::warning("w")
            .add_detail("error detail")
            .add_info("info detail")
            .add_note("note detail")
            .build();

        let kinds: Vec<DetailKind> = msg.details.iter().map(|d| d.kind).collect();
        assert_eq!(kinds, vec![DetailKind::Error, DetailKind::Info, DetailKind::Note]);
    }

    #[test]
    fn test_builder_problem_replaces() {
        let msg = DiagnosticMessageBuilder::error("e")
            .problem("first")
            .problem("second")
            .build();
        assert_eq!(msg.problem.as_deref(), Some("second"));
    }

    #[test]
    fn test_builder_optional_location() {
        let msg = DiagnosticMessageBuilder::error("e")
            .at_optional_location(None)
            .build();
        assert!(msg.location.is_none());

        let msg = DiagnosticMessageBuilder::error("e")
            .at_optional_location(Some(SourceInfo::default()))
            .build();
        assert_eq!(msg.location, Some(SourceInfo::default()));
    }
}
