//! Validated pipelines.

use tracing::debug;

use pigment_config::{ConfigError, Mode};

use crate::chain::{ChainResolution, LoaderRule, ModeOverrides, TransformChain, substitute_slots};
use crate::config::{DevServerConfig, OutputConfig, PipelineConfig};
use crate::inject::{InjectionPlan, resolve_injections};

/// A pipeline whose rules compiled and whose slots all resolve.
///
/// Chain lookup cannot fail: every rule's chain was substituted during
/// validation.
#[derive(Debug, Clone)]
pub struct ResolvedPipeline {
    pub mode: Option<Mode>,
    pub entry_points: Vec<String>,
    pub output: OutputConfig,
    pub dev_server: Option<DevServerConfig>,
    pub mode_overrides: ModeOverrides,
    rules: Vec<LoaderRule>,
    chains: Vec<TransformChain>,
    pub injections: InjectionPlan,
}

impl ResolvedPipeline {
    /// The chain for `asset`, or `NoMatch` when no rule applies.
    pub fn chain_for(&self, asset: &str) -> ChainResolution {
        match self.rules.iter().position(|rule| rule.pattern.matches(asset)) {
            Some(i) => ChainResolution::Chain(self.chains[i].clone()),
            None => ChainResolution::NoMatch,
        }
    }

    /// Chains for several assets, in the order given.
    pub fn chains_for<'a>(
        &self,
        assets: impl IntoIterator<Item = &'a str>,
    ) -> Vec<(&'a str, ChainResolution)> {
        assets
            .into_iter()
            .map(|asset| (asset, self.chain_for(asset)))
            .collect()
    }

    pub fn rules(&self) -> &[LoaderRule] {
        &self.rules
    }

    /// Each rule's chain with slots substituted, in declaration order.
    pub fn chains(&self) -> &[TransformChain] {
        &self.chains
    }

    /// Non-fatal problems found while validating.
    pub fn warnings(&self) -> &[ConfigError] {
        &self.injections.warnings
    }
}

impl PipelineConfig {
    /// Check every rule and plan the injections.
    ///
    /// All fatal problems are collected rather than stopping at the first.
    /// Duplicate injection outputs are warnings and end up in
    /// [`ResolvedPipeline::warnings`].
    pub fn validate(&self) -> Result<ResolvedPipeline, Vec<ConfigError>> {
        let mut errors = Vec::new();
        let mut rules = Vec::with_capacity(self.rules.len());
        let mut chains = Vec::with_capacity(self.rules.len());

        for (index, spec) in self.rules.iter().enumerate() {
            let rule = match spec.compile(index) {
                Ok(rule) => rule,
                Err(e) => {
                    errors.push(e);
                    continue;
                }
            };
            match substitute_slots(self.mode, &rule, &self.mode_overrides) {
                Ok(chain) => {
                    debug!(rule = index, transforms = ?chain.transforms, "rule validated");
                    chains.push(chain);
                    rules.push(rule);
                }
                Err(e) => errors.push(e),
            }
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(ResolvedPipeline {
            mode: self.mode,
            entry_points: self.entry_points.clone(),
            output: self.output.clone(),
            dev_server: self.dev_server.clone(),
            mode_overrides: self.mode_overrides.clone(),
            rules,
            chains,
            injections: resolve_injections(&self.injections),
        })
    }
}
