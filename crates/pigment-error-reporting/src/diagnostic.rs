//! Core diagnostic message types.
//!
//! This module defines the structures for representing diagnostic messages
//! (errors, warnings, info) following tidyverse-style guidelines.

use serde::{Deserialize, Serialize};

use crate::source_context::SourceContext;
use crate::source_info::SourceInfo;

/// The kind of diagnostic message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticKind {
    /// An error that prevents completion
    Error,
    /// A warning that doesn't prevent completion but indicates a problem
    Warning,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Error => "Error",
            DiagnosticKind::Warning => "Warning",
        }
    }
}

/// How detail items should be presented (tidyverse x/i bullet style).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetailKind {
    /// Error detail (✖ bullet)
    Error,
    /// Info detail (ℹ bullet)
    Info,
    /// Note detail (plain bullet)
    Note,
}

impl DetailKind {
    fn bullet(self) -> &'static str {
        match self {
            DetailKind::Error => "✖",
            DetailKind::Info => "ℹ",
            DetailKind::Note => "•",
        }
    }
}

/// A detail item in a diagnostic message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailItem {
    /// The kind of detail (error, info, note)
    pub kind: DetailKind,
    /// The content of the detail
    pub content: String,
}

/// A diagnostic message following tidyverse-style structure.
///
/// Structure:
/// 1. **Code**: Optional error code (e.g., "P-2-1") for searchability
/// 2. **Title**: Brief error message
/// 3. **Kind**: Error or Warning
/// 4. **Problem**: What went wrong (the "must" or "can't" statement)
/// 5. **Details**: Specific information
/// 6. **Hints**: Optional guidance for fixing (ends with ?)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticMessage {
    /// Optional error code (e.g., "P-2-1")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Brief title for the error
    pub title: String,

    /// The kind of diagnostic (Error or Warning)
    pub kind: DiagnosticKind,

    /// The problem statement
    #[serde(skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,

    /// Specific error details
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<DetailItem>,

    /// Optional hints for fixing
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,

    /// Source location for this diagnostic
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<SourceInfo>,
}

impl DiagnosticMessage {
    /// Render this diagnostic message as text following tidyverse style.
    ///
    /// Without source text the location is printed as a trailing line:
    /// ```text
    /// Error [P-2-2]: title
    /// Problem statement here
    /// ✖ Error detail
    /// ℹ Info detail
    /// • Note detail
    /// ? Hint
    /// at pigment.yaml:12:5
    /// ```
    ///
    /// When `ctx` holds the file the location points into, the title, code,
    /// problem and location are shown as an ariadne source snippet instead,
    /// followed by the details and hints.
    ///
    /// ```
    /// use pigment_error_reporting::{DiagnosticMessageBuilder, SourceContext, SourceInfo};
    ///
    /// let msg = DiagnosticMessageBuilder::error("Invalid Build Mode")
    ///     .with_code("P-1-3")
    ///     .problem("The build mode must be `development` or `production`")
    ///     .at_optional_location(Some(SourceInfo::new(Some("pigment.yaml".into()), 6, 1, 7, 7)))
    ///     .build();
    /// assert!(msg.to_text(None).ends_with("at pigment.yaml:1:7"));
    ///
    /// let mut ctx = SourceContext::new();
    /// ctx.add_file("pigment.yaml", "mode: staging\n");
    /// let text = msg.to_text(Some(&ctx));
    /// assert!(text.starts_with("Error: [P-1-3] Invalid Build Mode"));
    /// assert!(text.contains("mode: staging"));
    /// ```
    pub fn to_text(&self, ctx: Option<&SourceContext>) -> String {
        let snippet = match (&self.location, ctx) {
            (Some(location), Some(ctx)) => self.render_source_context(location, ctx),
            _ => None,
        };

        let mut lines = Vec::new();

        match &snippet {
            Some(snippet) => lines.push(snippet.clone()),
            None => {
                match &self.code {
                    Some(code) => {
                        lines.push(format!("{} [{}]: {}", self.kind.label(), code, self.title))
                    }
                    None => lines.push(format!("{}: {}", self.kind.label(), self.title)),
                }
                if let Some(problem) = &self.problem {
                    lines.push(problem.clone());
                }
            }
        }

        for detail in &self.details {
            lines.push(format!("{} {}", detail.kind.bullet(), detail.content));
        }

        for hint in &self.hints {
            lines.push(format!("? {}", hint));
        }

        if let (None, Some(location)) = (&snippet, &self.location) {
            lines.push(format!("at {}", location));
        }

        lines.join("\n")
    }

    /// Render this diagnostic message as a JSON value.
    pub fn to_json(&self) -> serde_json::Value {
        // Every field is plain data, so serialization cannot fail.
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }

    /// Render the located line with ariadne.
    ///
    /// Returns `None` when the file is not in `ctx` or the location does not
    /// fit its text; the caller falls back to plain text.
    fn render_source_context(&self, location: &SourceInfo, ctx: &SourceContext) -> Option<String> {
        use ariadne::{Config, Label, Report, ReportKind, Source};

        let file = ctx.get_file(location.file.as_deref()?)?;

        // Offsets count characters, as ariadne does.
        let end = location.end_offset().max(location.offset + 1);
        if end > file.content.chars().count() {
            return None;
        }

        let report_kind = match self.kind {
            DiagnosticKind::Error => ReportKind::Error,
            DiagnosticKind::Warning => ReportKind::Warning,
        };

        let message = match &self.code {
            Some(code) => format!("[{}] {}", code, self.title),
            None => self.title.clone(),
        };
        let label_message = self.problem.as_deref().unwrap_or(&self.title);

        let report = Report::build(report_kind, file.name.clone(), location.offset)
            .with_config(Config::default().with_color(false))
            .with_message(message)
            .with_label(
                Label::new((file.name.clone(), location.offset..end)).with_message(label_message),
            )
            .finish();

        let mut output = Vec::new();
        report
            .write(
                (file.name.clone(), Source::from(file.content.as_str())),
                &mut output,
            )
            .ok()?;
        let rendered = String::from_utf8(output).ok()?;

        // Label rows are padded out to the arrow column.
        Some(
            rendered
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::DiagnosticMessageBuilder;

    fn bogus_variant() -> DiagnosticMessage {
        DiagnosticMessageBuilder::error("Unknown Variant")
            .with_code("P-2-2")
            .problem("A variant identifier is not in the recognized set")
            .add_detail("unknown variant `bogus` at position 1 of category `opacity`")
            .add_hint("Did you mean `hover`?")
            .at_optional_location(Some(SourceInfo::new(Some("pigment.yaml".into()), 29, 2, 20, 5)))
            .build()
    }

    #[test]
    fn test_to_text_simple_error() {
        let msg = DiagnosticMessageBuilder::error("Something went wrong").build();
        assert_eq!(msg.to_text(None), "Error: Something went wrong");
    }

    #[test]
    fn test_to_text_with_code() {
        let msg = DiagnosticMessageBuilder::error("Something went wrong")
            .with_code("P-1-1")
            .build();
        assert_eq!(msg.to_text(None), "Error [P-1-1]: Something went wrong");
    }

    #[test]
    fn test_to_text_full_message() {
        let msg = DiagnosticMessageBuilder::warning("Duplicate Output Path")
            .with_code("P-3-2")
            .problem("Several injection targets write the same output file")
            .add_info("injection targets 0 and 1 both write `index.html`; target 1 wins")
            .add_note("Targets are written in declaration order")
            .add_hint("Give each target its own `filename`?")
            .build();

        insta::assert_snapshot!(msg.to_text(None), @r"
        Warning [P-3-2]: Duplicate Output Path
        Several injection targets write the same output file
        ℹ injection targets 0 and 1 both write `index.html`; target 1 wins
        • Targets are written in declaration order
        ? Give each target its own `filename`?
        ");
    }

    #[test]
    fn test_to_text_location_without_source() {
        let text = bogus_variant().to_text(None);
        assert!(text.ends_with("? Did you mean `hover`?\nat pigment.yaml:2:20"));

        // A context that lacks the file falls back the same way.
        let mut ctx = SourceContext::new();
        ctx.add_file("other.yaml", "variants: {}\n");
        assert_eq!(bogus_variant().to_text(Some(&ctx)), text);
    }

    #[test]
    fn test_to_text_with_source_snippet() {
        let mut ctx = SourceContext::new();
        ctx.add_file("pigment.yaml", "variants:\n  opacity: [hover, bogus]\n");

        insta::assert_snapshot!(bogus_variant().to_text(Some(&ctx)), @r"
        Error: [P-2-2] Unknown Variant
           ╭─[pigment.yaml:2:20]
           │
         2 │   opacity: [hover, bogus]
           │                    ──┬──
           │                      ╰──── A variant identifier is not in the recognized set
        ───╯
        ✖ unknown variant `bogus` at position 1 of category `opacity`
        ? Did you mean `hover`?
        ");
    }

    #[test]
    fn test_location_past_end_falls_back() {
        let mut ctx = SourceContext::new();
        ctx.add_file("pigment.yaml", "a: 1\n");
        assert!(bogus_variant().to_text(Some(&ctx)).ends_with("at pigment.yaml:2:20"));
    }

    #[test]
    fn test_to_json_simple() {
        let json = DiagnosticMessageBuilder::error("Something went wrong")
            .build()
            .to_json();

        assert_eq!(json["kind"], "error");
        assert_eq!(json["title"], "Something went wrong");
        assert!(json.get("code").is_none());
        assert!(json.get("problem").is_none());
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_to_json_full_message() {
        let json = bogus_variant().to_json();
        assert_eq!(json["kind"], "error");
        assert_eq!(json["code"], "P-2-2");
        assert_eq!(json["details"][0]["kind"], "error");
        assert_eq!(json["hints"][0], "Did you mean `hover`?");
        assert_eq!(json["location"]["line"], 2);
        assert_eq!(json["location"]["offset"], 29);
    }
}
