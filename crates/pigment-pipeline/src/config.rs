//! Pipeline configuration extraction from ConfigValue.
//!
//! Reads the `pipeline` section of a build document:
//!
//! ```yaml
//! pipeline:
//!   mode: development
//!   entry: ./build/App.js
//!   output: {path: ./public, filename: bundle.js}
//!   dev_server: {public_path: /, content_base: ./public, port: 8080}
//!   rules:
//!     - test: '\.(sass|scss|css)$'
//!       use: [cssExtract, css-loader, postcss-loader]
//!   mode_overrides:
//!     cssExtract: {development: style-loader, production: mini-css-extract}
//!   inject:
//!     - {template: ./src/index.html, filename: index.html}
//! ```
//!
//! Relative paths (output directory, dev-server content base, templates) are
//! resolved against the directory the document was loaded from.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use pigment_config::{ConfigEntry, ConfigError, ConfigValue, Mode};

use crate::chain::{ModeOverride, ModeOverrides, RuleSpec};
use crate::inject::InjectionTarget;
use crate::pattern::PatternSpec;

/// Entry module used when `entry` is absent.
pub const DEFAULT_ENTRY: &str = "./src/index.js";

/// Where bundles are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputConfig {
    pub path: PathBuf,
    pub filename: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("dist"),
            filename: "main.js".to_string(),
        }
    }
}

/// Development server settings handed to the external server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevServerConfig {
    pub public_path: String,
    pub content_base: PathBuf,
    pub port: u16,
}

/// Unvalidated pipeline inputs.
///
/// Shapes are checked on extraction. Patterns and mode ambiguity are
/// checked by [`PipelineConfig::validate`](crate::PipelineConfig::validate).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelineConfig {
    pub mode: Option<Mode>,
    pub entry_points: Vec<String>,
    pub output: OutputConfig,
    pub dev_server: Option<DevServerConfig>,
    pub rules: Vec<RuleSpec>,
    pub mode_overrides: ModeOverrides,
    pub injections: Vec<InjectionTarget>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            mode: None,
            entry_points: vec![DEFAULT_ENTRY.to_string()],
            output: OutputConfig::default(),
            dev_server: None,
            rules: Vec::new(),
            mode_overrides: ModeOverrides::new(),
            injections: Vec::new(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the build mode. The driver decides it; a mode given here replaces
    /// one read from the document.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn rule(mut self, rule: RuleSpec) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn mode_override(mut self, slot: impl Into<String>, choice: ModeOverride) -> Self {
        self.mode_overrides.insert(slot.into(), choice);
        self
    }

    pub fn inject(mut self, target: InjectionTarget) -> Self {
        self.injections.push(target);
        self
    }

    /// Extract the `pipeline` section of a build document.
    ///
    /// An absent section yields [`PipelineConfig::default`] with the output
    /// directory placed under `context_dir`. A document that is neither a
    /// mapping nor empty is an `InvalidStructure` error.
    pub fn from_config_value(root: &ConfigValue, context_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        config.output.path = context_dir.join(&config.output.path);

        if root.is_null() {
            return Ok(config);
        }
        root.expect_map("<root>")?;

        let Some(pipeline) = field(root, "pipeline") else {
            return Ok(config);
        };
        pipeline.expect_map("pipeline")?;

        if let Some(mode) = field(pipeline, "mode") {
            let text = mode.expect_str("pipeline.mode")?;
            config.mode = Some(text.parse::<Mode>().map_err(|_| ConfigError::InvalidMode {
                value: text.to_string(),
                location: Some(mode.source_info.clone()),
            })?);
        }

        if let Some(entry) = field(pipeline, "entry") {
            let entries = entry.expect_string_list("pipeline.entry")?;
            if entries.is_empty() {
                return Err(entry.structure_error("pipeline.entry", "at least one entry module"));
            }
            config.entry_points = entries;
        }

        if let Some(output) = field(pipeline, "output") {
            config.output = extract_output(output, context_dir)?;
        }

        if let Some(dev_server) = field(pipeline, "dev_server") {
            config.dev_server = Some(extract_dev_server(dev_server, context_dir)?);
        }

        if let Some(rules) = field(pipeline, "rules") {
            let items = rules
                .as_array()
                .ok_or_else(|| rules.structure_error("pipeline.rules", "a list of rules"))?;
            config.rules = items
                .iter()
                .enumerate()
                .map(|(i, item)| extract_rule(item, &format!("pipeline.rules[{}]", i)))
                .collect::<Result<_, _>>()?;
        }

        if let Some(overrides) = field(pipeline, "mode_overrides") {
            for entry in overrides.expect_map("pipeline.mode_overrides")? {
                let choice = extract_override(entry)?;
                config.mode_overrides.insert(entry.key.clone(), choice);
            }
        }

        if let Some(inject) = field(pipeline, "inject") {
            let items = inject
                .as_array()
                .ok_or_else(|| inject.structure_error("pipeline.inject", "a list of targets"))?;
            config.injections = items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    extract_injection(item, &format!("pipeline.inject[{}]", i), context_dir)
                })
                .collect::<Result<_, _>>()?;
        }

        Ok(config)
    }
}

/// Resolve `path` against `context_dir`. Absolute paths are returned as is;
/// `.` components are dropped.
///
/// ```
/// use std::path::{Path, PathBuf};
/// use pigment_pipeline::resolve_path;
///
/// assert_eq!(resolve_path(Path::new("/app"), "./public"), PathBuf::from("/app/public"));
/// assert_eq!(resolve_path(Path::new("/app"), "/srv/www"), PathBuf::from("/srv/www"));
/// ```
pub fn resolve_path(context_dir: &Path, path: &str) -> PathBuf {
    let path = Path::new(path);
    if path.is_absolute() {
        return path.to_path_buf();
    }
    let relative: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();
    context_dir.join(relative)
}

/// A present, non-null field of a mapping.
fn field<'a>(map: &'a ConfigValue, key: &str) -> Option<&'a ConfigValue> {
    map.get(key).filter(|v| !v.is_null())
}

fn non_empty_str<'a>(value: &'a ConfigValue, path: &str) -> Result<&'a str, ConfigError> {
    let s = value.expect_str(path)?;
    if s.is_empty() {
        return Err(value.structure_error(path, "a non-empty string"));
    }
    Ok(s)
}

fn extract_output(value: &ConfigValue, context_dir: &Path) -> Result<OutputConfig, ConfigError> {
    value.expect_map("pipeline.output")?;
    let defaults = OutputConfig::default();

    let path = match field(value, "path") {
        Some(path) => resolve_path(context_dir, non_empty_str(path, "pipeline.output.path")?),
        None => context_dir.join(&defaults.path),
    };
    let filename = match field(value, "filename") {
        Some(filename) => non_empty_str(filename, "pipeline.output.filename")?.to_string(),
        None => defaults.filename,
    };

    Ok(OutputConfig { path, filename })
}

fn extract_dev_server(
    value: &ConfigValue,
    context_dir: &Path,
) -> Result<DevServerConfig, ConfigError> {
    value.expect_map("pipeline.dev_server")?;

    let public_path = match field(value, "public_path") {
        Some(p) => p.expect_str("pipeline.dev_server.public_path")?.to_string(),
        None => "/".to_string(),
    };
    let content_base = match field(value, "content_base") {
        Some(base) => resolve_path(
            context_dir,
            non_empty_str(base, "pipeline.dev_server.content_base")?,
        ),
        None => context_dir.to_path_buf(),
    };
    let port = match field(value, "port") {
        Some(port) => port
            .as_i64()
            .and_then(|p| u16::try_from(p).ok())
            .filter(|p| *p != 0)
            .ok_or_else(|| {
                port.structure_error("pipeline.dev_server.port", "a port between 1 and 65535")
            })?,
        None => 8080,
    };

    Ok(DevServerConfig {
        public_path,
        content_base,
        port,
    })
}

fn extract_rule(value: &ConfigValue, path: &str) -> Result<RuleSpec, ConfigError> {
    value.expect_map(path)?;

    let mut patterns = Vec::new();
    if let Some(test) = field(value, "test") {
        patterns.push(PatternSpec::regex(test.expect_str(&format!("{}.test", path))?));
    }
    if let Some(exts) = field(value, "extensions") {
        patterns.push(PatternSpec::Extensions(
            exts.expect_string_list(&format!("{}.extensions", path))?,
        ));
    }
    if let Some(glob) = field(value, "glob") {
        patterns.push(PatternSpec::glob(glob.expect_str(&format!("{}.glob", path))?));
    }
    if patterns.len() != 1 {
        return Err(ConfigError::InvalidStructure {
            path: path.to_string(),
            expected: "exactly one of `test`, `extensions` or `glob`".to_string(),
            found: format!("{} patterns", patterns.len()),
            location: Some(value.source_info.clone()),
        });
    }

    let use_path = format!("{}.use", path);
    let transforms = match field(value, "use") {
        Some(transforms) => transforms.expect_string_list(&use_path)?,
        None => Vec::new(),
    };
    if transforms.is_empty() {
        return Err(value.structure_error(&use_path, "a non-empty list of transforms"));
    }

    Ok(RuleSpec {
        pattern: patterns.remove(0),
        transforms,
    })
}

fn extract_override(entry: &ConfigEntry) -> Result<ModeOverride, ConfigError> {
    let path = format!("pipeline.mode_overrides.{}", entry.key);
    entry.value.expect_map(&path)?;

    let pick = |mode: Mode| -> Result<String, ConfigError> {
        let mode_path = format!("{}.{}", path, mode);
        match field(&entry.value, mode.as_str()) {
            Some(v) => Ok(non_empty_str(v, &mode_path)?.to_string()),
            None => Err(entry.value.structure_error(&mode_path, "a transform identifier")),
        }
    };

    Ok(ModeOverride {
        development: pick(Mode::Development)?,
        production: pick(Mode::Production)?,
    })
}

fn extract_injection(
    value: &ConfigValue,
    path: &str,
    context_dir: &Path,
) -> Result<InjectionTarget, ConfigError> {
    value.expect_map(path)?;

    let template_path = format!("{}.template", path);
    let template = match field(value, "template") {
        Some(t) => resolve_path(context_dir, non_empty_str(t, &template_path)?),
        None => return Err(value.structure_error(&template_path, "a template path")),
    };
    let filename = match field(value, "filename") {
        Some(f) => non_empty_str(f, &format!("{}.filename", path))?.to_string(),
        None => "index.html".to_string(),
    };

    Ok(InjectionTarget { template, filename })
}
