//! Build configuration resolution for pigment.
//!
//! Loads one build document, then runs the theme and pipeline resolvers
//! through a small state machine:
//!
//! - [`load_build_config`] / [`load_build_config_file`] produce a
//!   [`BuildConfig`].
//! - [`BuildSession::validate`] runs both resolvers and yields a
//!   [`ResolvedBuild`] or a [`BuildFailure`] listing every fatal error.
//! - [`ResolvedBuild::consume`] hands out the immutable [`BuildOutput`].
//!
//! The build mode is decided by the caller and injected with
//! [`BuildConfig::with_mode`]; nothing here inspects the process.
//!
//! # Example
//!
//! ```
//! use pigment_config::Mode;
//! use pigment_core::{BuildSession, load_build_config};
//!
//! let yaml = r#"
//! theme:
//!   zIndex: {'50': 50, '50': 75}
//! pipeline:
//!   rules:
//!     - test: '\.css$'
//!       use: [cssExtract, css-loader]
//!   mode_overrides:
//!     cssExtract: {development: style-loader, production: mini-css-extract}
//! "#;
//!
//! let config = load_build_config(yaml, "pigment.yaml").unwrap().with_mode(Mode::Production);
//! let build = BuildSession::new(config).validate().unwrap();
//!
//! assert_eq!(build.theme().token("zIndex", "50").unwrap().to_string(), "75");
//! let chain = build.chain_for("main.css");
//! assert_eq!(chain.chain().unwrap().transforms, ["mini-css-extract", "css-loader"]);
//!
//! let output = build.consume();
//! assert!(output.warnings.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod session;

pub use config::{BuildConfig, load_build_config, load_build_config_file};
pub use error::BuildFailure;
pub use session::{BuildOutput, BuildSession, BuildState, ResolvedBuild};
