//! Asset pipeline resolution for pigment.
//!
//! Maps a build [`Mode`](pigment_config::Mode) and an asset identifier to
//! the ordered transforms the external bundler applies, and plans the
//! generated artifacts (HTML shells and the like) it writes.
//!
//! - [`resolve_chain`]: first matching [`LoaderRule`] wins; mode-dependent
//!   slots are substituted through [`ModeOverrides`]. No match is
//!   [`ChainResolution::NoMatch`], not an error.
//! - [`resolve_injections`]: descriptors in write order. Two targets with the
//!   same output produce a non-fatal `DuplicateOutputPath` warning and the
//!   later target wins.
//! - [`PipelineConfig`]: the `pipeline` document section. Its
//!   [`validate`](PipelineConfig::validate) compiles every pattern and checks
//!   every slot up front, producing a [`ResolvedPipeline`] whose lookups
//!   cannot fail.
//!
//! # Example
//!
//! ```
//! use pigment_config::Mode;
//! use pigment_pipeline::{ModeOverride, PatternSpec, PipelineConfig, RuleSpec};
//!
//! let pipeline = PipelineConfig::new()
//!     .with_mode(Mode::Production)
//!     .rule(RuleSpec::new(PatternSpec::regex(r"\.css$"), ["cssExtract", "css-loader"]))
//!     .mode_override("cssExtract", ModeOverride::new("style-loader", "mini-css-extract"))
//!     .validate()
//!     .unwrap();
//!
//! let chain = pipeline.chain_for("main.css");
//! assert_eq!(chain.chain().unwrap().transforms, ["mini-css-extract", "css-loader"]);
//! ```

mod chain;
mod config;
mod inject;
mod pattern;
mod resolved;

pub use chain::{
    ChainResolution, LoaderRule, ModeOverride, ModeOverrides, RuleSpec, TransformChain,
    resolve_chain, substitute_slots,
};
pub use config::{DEFAULT_ENTRY, DevServerConfig, OutputConfig, PipelineConfig, resolve_path};
pub use inject::{InjectionDescriptor, InjectionPlan, InjectionTarget, resolve_injections};
pub use pattern::{MatchPattern, PatternSpec};
pub use resolved::ResolvedPipeline;
