//! Injection targets: generated artifacts such as the HTML shell.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use pigment_config::ConfigError;

/// A template-to-output binding, as declared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectionTarget {
    pub template: PathBuf,
    /// Output file name, relative to the output directory.
    pub filename: String,
}

impl InjectionTarget {
    pub fn new(template: impl Into<PathBuf>, filename: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            filename: filename.into(),
        }
    }
}

/// One write the external templating runtime performs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InjectionDescriptor {
    /// Declaration index of the target; also the write order.
    pub index: usize,
    pub template: PathBuf,
    pub output: String,
}

/// Injection descriptors in write order, with the warnings raised while
/// planning them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InjectionPlan {
    pub descriptors: Vec<InjectionDescriptor>,
    #[serde(skip)]
    pub warnings: Vec<ConfigError>,
}

impl InjectionPlan {
    /// Output file to the descriptor whose write lands last.
    ///
    /// Outputs appear in the order they were first declared.
    pub fn final_outputs(&self) -> IndexMap<&str, &InjectionDescriptor> {
        let mut outputs = IndexMap::new();
        for descriptor in &self.descriptors {
            outputs.insert(descriptor.output.as_str(), descriptor);
        }
        outputs
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Plan the injection writes, in declaration order.
///
/// Two targets writing the same output both stay in the plan; the later one
/// wins and a `DuplicateOutputPath` warning is recorded.
pub fn resolve_injections(targets: &[InjectionTarget]) -> InjectionPlan {
    let mut plan = InjectionPlan::default();
    let mut last_writer: IndexMap<String, usize> = IndexMap::new();

    for (index, target) in targets.iter().enumerate() {
        let output = normalize_output(&target.filename);

        if let Some(previous) = last_writer.insert(output.clone(), index) {
            warn!(
                output = %output,
                first = previous,
                second = index,
                "two injection targets write the same output; the later one wins"
            );
            plan.warnings.push(ConfigError::DuplicateOutputPath {
                output: output.clone(),
                first_index: previous,
                second_index: index,
            });
        }

        plan.descriptors.push(InjectionDescriptor {
            index,
            template: target.template.clone(),
            output,
        });
    }

    plan
}

/// `./index.html` and `index.html` name the same output.
fn normalize_output(filename: &str) -> String {
    let mut name = filename;
    while let Some(rest) = name.strip_prefix("./") {
        name = rest;
    }
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_declaration_order_is_write_order() {
        let plan = resolve_injections(&[
            InjectionTarget::new("src/index.html", "index.html"),
            InjectionTarget::new("src/about.html", "about.html"),
        ]);

        let outputs: Vec<&str> = plan.descriptors.iter().map(|d| d.output.as_str()).collect();
        assert_eq!(outputs, vec!["index.html", "about.html"]);
        assert!(!plan.has_warnings());
    }

    #[test]
    fn test_duplicate_output_warns_and_last_wins() {
        let plan = resolve_injections(&[
            InjectionTarget::new("src/index.html", "index.html"),
            InjectionTarget::new("src/about.html", "about.html"),
            InjectionTarget::new("src/alt.html", "./index.html"),
        ]);

        assert_eq!(plan.descriptors.len(), 3);
        assert_eq!(
            plan.warnings,
            vec![ConfigError::DuplicateOutputPath {
                output: "index.html".to_string(),
                first_index: 0,
                second_index: 2,
            }]
        );
        assert!(plan.warnings.iter().all(|w| !w.is_fatal()));

        let finals = plan.final_outputs();
        assert_eq!(finals.len(), 2);
        assert_eq!(finals["index.html"].template, PathBuf::from("src/alt.html"));
        let order: Vec<&str> = finals.keys().copied().collect();
        assert_eq!(order, vec!["index.html", "about.html"]);
    }

    #[test]
    fn test_three_writers_chain_warnings() {
        let plan = resolve_injections(&[
            InjectionTarget::new("a.html", "index.html"),
            InjectionTarget::new("b.html", "index.html"),
            InjectionTarget::new("c.html", "index.html"),
        ]);

        let pairs: Vec<(usize, usize)> = plan
            .warnings
            .iter()
            .filter_map(|w| match w {
                ConfigError::DuplicateOutputPath {
                    first_index,
                    second_index,
                    ..
                } => Some((*first_index, *second_index)),
                _ => None,
            })
            .collect();
        assert_eq!(pairs, vec![(0, 1), (1, 2)]);
        assert_eq!(plan.final_outputs()["index.html"].index, 2);
    }

    #[test]
    fn test_empty_plan() {
        let plan = resolve_injections(&[]);
        assert!(plan.descriptors.is_empty());
        assert!(plan.final_outputs().is_empty());
    }
}
