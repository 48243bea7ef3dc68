//! Pipeline extraction, validation and lookup from YAML text.

use std::path::{Path, PathBuf};

use pigment_config::{ConfigError, Mode, parse_file};
use pigment_pipeline::{ChainResolution, PipelineConfig, ResolvedPipeline};
use pretty_assertions::assert_eq;

const PIPELINE: &str = r#"
pipeline:
  entry: ./build/App.js
  output: {path: ./public, filename: bundle.js}
  rules:
    - test: '\.(sass|scss|css)$'
      use: [cssExtract, css-loader, postcss-loader]
    - test: '\.(png|jpg|jpeg|gif|svg|woff|woff2|ttf|eot)(\?.*)?$'
      use: [file-loader]
  mode_overrides:
    cssExtract: {development: style-loader, production: mini-css-extract}
  inject:
    - {template: ./src/index.html, filename: index.html}
    - {template: ./src/fallback.html, filename: index.html}
"#;

fn load(mode: Option<Mode>) -> Result<ResolvedPipeline, Vec<ConfigError>> {
    let root = parse_file(PIPELINE, "/site/pigment.yaml").map_err(|e| vec![e])?;
    let mut config =
        PipelineConfig::from_config_value(&root, Path::new("/site")).map_err(|e| vec![e])?;
    if let Some(mode) = mode {
        config = config.with_mode(mode);
    }
    config.validate()
}

fn transforms(pipeline: &ResolvedPipeline, asset: &str) -> Vec<String> {
    match pipeline.chain_for(asset) {
        ChainResolution::Chain(chain) => chain.transforms,
        ChainResolution::NoMatch => Vec::new(),
    }
}

#[test]
fn test_development_chains() {
    let pipeline = load(Some(Mode::Development)).unwrap();
    assert_eq!(
        transforms(&pipeline, "./src/styles/main.scss"),
        vec!["style-loader", "css-loader", "postcss-loader"]
    );
    assert_eq!(
        transforms(&pipeline, "./fonts/fa.woff2?v=4.7.0"),
        vec!["file-loader"]
    );
    assert_eq!(pipeline.chain_for("./build/App.js"), ChainResolution::NoMatch);
}

#[test]
fn test_production_chains() {
    let pipeline = load(Some(Mode::Production)).unwrap();
    assert_eq!(
        transforms(&pipeline, "main.css"),
        vec!["mini-css-extract", "css-loader", "postcss-loader"]
    );
}

#[test]
fn test_mode_is_required_for_slots() {
    let errors = load(None).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(
        &errors[0],
        ConfigError::AmbiguousMode { rule_index: 0, slot } if slot == "cssExtract"
    ));
}

#[test]
fn test_paths_and_injections() {
    let pipeline = load(Some(Mode::Development)).unwrap();
    assert_eq!(pipeline.output.path, PathBuf::from("/site/public"));
    assert_eq!(pipeline.output.filename, "bundle.js");
    assert_eq!(pipeline.entry_points, vec!["./build/App.js"]);

    assert_eq!(pipeline.warnings().len(), 1);
    let winner = pipeline.injections.final_outputs()["index.html"];
    assert_eq!(winner.index, 1);
    assert_eq!(winner.template, PathBuf::from("/site/src/fallback.html"));

    let diagnostic = pipeline.warnings()[0].to_diagnostic();
    assert_eq!(diagnostic.code.as_deref(), Some("P-3-2"));
}
