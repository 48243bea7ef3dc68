//! Build documents.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use pigment_config::{ConfigError, ConfigValue, Mode, parse_file};
use pigment_error_reporting::SourceContext;
use pigment_pipeline::PipelineConfig;
use pigment_theme::ThemeConfig;

/// Both resolvers' inputs, extracted from one document.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildConfig {
    pub theme: ThemeConfig,
    pub pipeline: PipelineConfig,
    /// File the configuration was loaded from, if any.
    pub source: Option<PathBuf>,
    /// Text of the loaded document, for rendering diagnostics.
    pub source_context: SourceContext,
}

impl BuildConfig {
    pub fn new(theme: ThemeConfig, pipeline: PipelineConfig) -> Self {
        Self {
            theme,
            pipeline,
            source: None,
            source_context: SourceContext::new(),
        }
    }

    /// Inject the build mode, replacing any mode named in the document.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.pipeline = self.pipeline.with_mode(mode);
        self
    }

    /// Extract both sections of a parsed document. Relative paths resolve
    /// against `context_dir`.
    pub fn from_config_value(root: &ConfigValue, context_dir: &Path) -> Result<Self, ConfigError> {
        let theme = ThemeConfig::from_config_value(root)?;
        let pipeline = PipelineConfig::from_config_value(root, context_dir)?;
        debug!(
            base = theme.base.len(),
            extend = theme.extend.len(),
            rules = pipeline.rules.len(),
            "build configuration extracted"
        );
        Ok(Self::new(theme, pipeline))
    }
}

/// Load a build configuration from YAML text.
///
/// `filename` is recorded in source locations and its directory is the base
/// for relative paths.
pub fn load_build_config(content: &str, filename: &str) -> Result<BuildConfig, ConfigError> {
    let root = parse_file(content, filename)?;
    let mut config = BuildConfig::from_config_value(&root, context_dir(Path::new(filename)))?;
    config.source = Some(PathBuf::from(filename));
    config.source_context.add_file(filename, content);
    Ok(config)
}

/// Read and load a build configuration file.
pub fn load_build_config_file(path: &Path) -> Result<BuildConfig, ConfigError> {
    let filename = path.to_string_lossy().to_string();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::Parse {
        message: format!("could not read file: {}", e),
        file: Some(filename.clone()),
    })?;
    load_build_config(&content, &filename)
}

fn context_dir(file: &Path) -> &Path {
    match file.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_context_dir() {
        assert_eq!(context_dir(Path::new("/app/pigment.yaml")), Path::new("/app"));
        assert_eq!(context_dir(Path::new("pigment.yaml")), Path::new("."));
    }

    #[test]
    fn test_load_records_source() {
        let config = load_build_config("plugins: [forms]\n", "/app/pigment.yaml").unwrap();
        assert_eq!(config.source, Some(PathBuf::from("/app/pigment.yaml")));
        assert_eq!(
            config.source_context.get_file("/app/pigment.yaml").unwrap().content,
            "plugins: [forms]\n"
        );
        assert_eq!(config.theme.plugins, vec!["forms"]);
        assert_eq!(config.pipeline.output.path, PathBuf::from("/app/dist"));
    }

    #[test]
    fn test_with_mode() {
        let config = load_build_config("pipeline: {mode: development}\n", "pigment.yaml")
            .unwrap()
            .with_mode(Mode::Production);
        assert_eq!(config.pipeline.mode, Some(Mode::Production));
    }

    #[test]
    fn test_parse_error_names_file() {
        let err = load_build_config("theme: [", "broken.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { file: Some(ref f), .. } if f == "broken.yaml"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_build_config_file(Path::new("/nonexistent/pigment.yaml")).unwrap_err();
        assert!(err.to_string().contains("could not read file"));
    }
}
