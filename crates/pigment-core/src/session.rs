//! The build-level resolution state machine.
//!
//! ```text
//! Unconfigured --validate--> Validating --+--> Resolved --consume--> Consumed
//!                                          |
//!                                          +--> BuildFailure
//! ```
//!
//! Each state is its own type and every transition takes `self` by value, so
//! a session cannot be validated twice, a failure cannot be retried in place
//! and a resolved build is consumed at most once.

use tracing::{debug, warn};

use pigment_config::{ConfigError, Mode};
use pigment_error_reporting::DiagnosticMessage;
use pigment_pipeline::{ChainResolution, ResolvedPipeline};
use pigment_theme::FinalTheme;

use crate::config::BuildConfig;
use crate::error::BuildFailure;

/// Where a build is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BuildState {
    /// Configuration supplied but not yet checked.
    Unconfigured,
    /// Checks running. A failed attempt ends here.
    Validating,
    /// Both resolvers succeeded; the snapshot is ready.
    Resolved,
    /// The snapshot was handed to a build.
    Consumed,
}

/// A build that has configuration but has not been validated.
#[derive(Debug, Clone)]
pub struct BuildSession {
    config: BuildConfig,
}

impl BuildSession {
    pub fn new(config: BuildConfig) -> Self {
        Self { config }
    }

    pub fn state(&self) -> BuildState {
        BuildState::Unconfigured
    }

    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run both resolvers.
    ///
    /// Every fatal error is reported, not just the first. Warnings do not
    /// stop the build and are kept on the result.
    pub fn validate(self) -> Result<ResolvedBuild, BuildFailure> {
        debug!(state = ?BuildState::Validating, source = ?self.config.source, "validating build");

        let mut errors = Vec::new();

        let theme = self
            .config
            .theme
            .resolve()
            .map_err(|e| errors.extend(e))
            .ok();
        let pipeline = self
            .config
            .pipeline
            .validate()
            .map_err(|e| errors.extend(e))
            .ok();

        let warnings: Vec<ConfigError> = pipeline
            .as_ref()
            .map(|p| p.warnings().to_vec())
            .unwrap_or_default();

        match (theme, pipeline) {
            (Some(theme), Some(pipeline)) if errors.is_empty() => {
                for warning in &warnings {
                    warn!(code = warning.code(), "{}", warning);
                }
                debug!(state = ?BuildState::Resolved, warnings = warnings.len(), "build resolved");
                Ok(ResolvedBuild {
                    theme,
                    pipeline,
                    warnings,
                })
            }
            _ => {
                debug!(errors = errors.len(), "build validation failed");
                Err(BuildFailure {
                    errors,
                    warnings,
                    source_context: self.config.source_context,
                })
            }
        }
    }
}

/// A validated, immutable snapshot of both resolvers' output.
#[derive(Debug, Clone)]
pub struct ResolvedBuild {
    theme: FinalTheme,
    pipeline: ResolvedPipeline,
    warnings: Vec<ConfigError>,
}

impl ResolvedBuild {
    pub fn state(&self) -> BuildState {
        BuildState::Resolved
    }

    pub fn theme(&self) -> &FinalTheme {
        &self.theme
    }

    pub fn pipeline(&self) -> &ResolvedPipeline {
        &self.pipeline
    }

    pub fn mode(&self) -> Option<Mode> {
        self.pipeline.mode
    }

    /// Shortcut for [`ResolvedPipeline::chain_for`].
    pub fn chain_for(&self, asset: &str) -> ChainResolution {
        self.pipeline.chain_for(asset)
    }

    pub fn warnings(&self) -> &[ConfigError] {
        &self.warnings
    }

    pub fn diagnostics(&self) -> Vec<DiagnosticMessage> {
        self.warnings.iter().map(ConfigError::to_diagnostic).collect()
    }

    /// Hand the snapshot to a build. One-way.
    pub fn consume(self) -> BuildOutput {
        debug!(state = ?BuildState::Consumed, "build consumed");
        BuildOutput {
            theme: self.theme,
            pipeline: self.pipeline,
            warnings: self.warnings,
        }
    }
}

/// The snapshot as handed to the external CSS engine and bundler.
#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub theme: FinalTheme,
    pub pipeline: ResolvedPipeline,
    pub warnings: Vec<ConfigError>,
}

impl BuildOutput {
    pub fn state(&self) -> BuildState {
        BuildState::Consumed
    }

    pub fn diagnostics(&self) -> Vec<DiagnosticMessage> {
        self.warnings.iter().map(ConfigError::to_diagnostic).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pigment_config::ConfigValue;
    use pigment_pipeline::{InjectionTarget, ModeOverride, PatternSpec, PipelineConfig, RuleSpec};
    use pigment_theme::ThemeConfig;

    fn css_rules() -> PipelineConfig {
        PipelineConfig::new()
            .rule(RuleSpec::new(PatternSpec::regex(r"\.css$"), ["cssExtract"]))
            .mode_override("cssExtract", ModeOverride::new("style-loader", "mini-css-extract"))
    }

    #[test]
    fn test_states_are_ordered() {
        assert!(BuildState::Unconfigured < BuildState::Validating);
        assert!(BuildState::Validating < BuildState::Resolved);
        assert!(BuildState::Resolved < BuildState::Consumed);
    }

    #[test]
    fn test_happy_path_transitions() {
        let config = BuildConfig::new(ThemeConfig::new(), css_rules()).with_mode(Mode::Development);
        let session = BuildSession::new(config);
        assert_eq!(session.state(), BuildState::Unconfigured);

        let resolved = session.validate().unwrap();
        assert_eq!(resolved.state(), BuildState::Resolved);
        assert_eq!(resolved.mode(), Some(Mode::Development));
        assert!(resolved.chain_for("a.css").chain().unwrap().contains("style-loader"));

        let output = resolved.consume();
        assert_eq!(output.state(), BuildState::Consumed);
        assert!(output.warnings.is_empty());
    }

    #[test]
    fn test_failure_collects_both_resolvers() {
        let theme = ThemeConfig::new().variants_for("backgroundColor", ["bogus"]);
        let failure = BuildSession::new(BuildConfig::new(theme, css_rules()))
            .validate()
            .unwrap_err();

        assert_eq!(failure.state(), BuildState::Validating);
        let codes: Vec<&str> = failure.errors.iter().map(ConfigError::code).collect();
        assert_eq!(codes, vec!["P-2-2", "P-3-1"]);
        assert_eq!(failure.to_string(), "build configuration is invalid (2 errors)");
    }

    #[test]
    fn test_warnings_survive_to_output() {
        let pipeline = PipelineConfig::new()
            .inject(InjectionTarget::new("a.html", "index.html"))
            .inject(InjectionTarget::new("b.html", "index.html"));
        let theme = ThemeConfig::new().base_category(
            "zIndex",
            ConfigValue::map([("10", ConfigValue::integer(10))]),
        );

        let resolved = BuildSession::new(BuildConfig::new(theme, pipeline))
            .validate()
            .unwrap();
        assert_eq!(resolved.warnings().len(), 1);
        assert_eq!(resolved.diagnostics()[0].code.as_deref(), Some("P-3-2"));

        let output = resolved.consume();
        assert_eq!(output.diagnostics().len(), 1);
    }

    #[test]
    fn test_failure_keeps_warnings() {
        let pipeline = PipelineConfig::new()
            .inject(InjectionTarget::new("a.html", "index.html"))
            .inject(InjectionTarget::new("b.html", "index.html"));
        let theme = ThemeConfig::new().base_category("zIndex", ConfigValue::string("oops"));

        let failure = BuildSession::new(BuildConfig::new(theme, pipeline))
            .validate()
            .unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert_eq!(failure.warnings.len(), 1);
        assert_eq!(failure.diagnostics().len(), 2);
    }

    #[test]
    fn test_failure_render_snapshot() {
        let config = crate::load_build_config(
            "variants:\n  opacity: [hover, bogus]\n",
            "pigment.yaml",
        )
        .unwrap();
        let failure = BuildSession::new(config).validate().unwrap_err();

        insta::assert_snapshot!(failure.render(), @r"
        Error: [P-2-2] Unknown Variant
           ╭─[pigment.yaml:2:20]
           │
         2 │   opacity: [hover, bogus]
           │                    ──┬──
           │                      ╰──── A variant identifier is not in the recognized set
        ───╯
        ✖ unknown variant `bogus` at position 1 of category `opacity`
        ? Use one of responsive, hover, focus, active, disabled, group-hover, focus-within?
        ");
    }

    #[test]
    fn test_failure_reports_every_theme_error() {
        let config = crate::load_build_config(
            "theme:\n  spacing: 4px\nvariants:\n  opacity: [bogus]\n  textColor: [nope]\n",
            "pigment.yaml",
        )
        .unwrap();
        let failure = BuildSession::new(config).validate().unwrap_err();

        let codes: Vec<&str> = failure.errors.iter().map(ConfigError::code).collect();
        assert_eq!(codes, vec!["P-2-1", "P-2-2", "P-2-2"]);
        assert_eq!(failure.to_string(), "build configuration is invalid (3 errors)");
        assert_eq!(failure.render().matches("╭─[pigment.yaml:").count(), 3);
    }

    #[test]
    fn test_render_without_source_text() {
        let theme = ThemeConfig::new().variants_for("opacity", ["bogus"]);
        let failure = BuildSession::new(BuildConfig::new(theme, PipelineConfig::new()))
            .validate()
            .unwrap_err();

        assert_eq!(
            failure.render(),
            "Error [P-2-2]: Unknown Variant\n\
             A variant identifier is not in the recognized set\n\
             ✖ unknown variant `bogus` at position 0 of category `opacity`\n\
             ? Use one of responsive, hover, focus, active, disabled, group-hover, focus-within?\n\
             at 1:1"
        );
    }
}
