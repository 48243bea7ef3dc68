//! Configuration values, loading and merging for pigment.
//!
//! Both resolvers (theme and pipeline) consume configuration as plain data.
//! This crate owns the shapes and rules they share:
//!
//! - [`ConfigValue`]: a loaded value with its [`SourceInfo`]. Maps are kept as
//!   ordered entry lists, so a key declared twice is still visible as two
//!   entries and the later one can win deterministically.
//! - [`parse`] / [`parse_file`]: YAML loading via yaml-rust2
//!   events, preserving declaration order and duplicate keys.
//! - [`last_write_wins`] and [`merge_tables`]: the merge rules shared by the
//!   resolvers.
//! - [`ConfigError`]: the error taxonomy, convertible to diagnostics.
//! - [`Mode`]: the build context injected by the driver.
//!
//! # Example
//!
//! ```
//! use pigment_config::{last_write_wins, parse};
//!
//! let value = parse("zIndex:\n  '50': 50\n  '50': 75\n").unwrap();
//! let category = value.get("zIndex").unwrap();
//! let entries = category.as_map().unwrap();
//! assert_eq!(entries.len(), 2);
//!
//! let (table, overwritten) =
//!     last_write_wins(entries.iter().map(|e| (e.key.clone(), e.value.clone())));
//! assert_eq!(table["50"].as_i64(), Some(75));
//! assert_eq!(overwritten, vec!["50".to_string()]);
//! ```

mod error;
mod merge;
mod mode;
mod value;
mod yaml;

pub use error::ConfigError;
pub use merge::{MergeOp, last_write_wins, merge_tables};
pub use mode::Mode;
pub use value::{ConfigEntry, ConfigValue, ConfigValueKind, Scalar};
pub use yaml::{parse, parse_file};

// Re-export for convenience
pub use pigment_error_reporting::SourceInfo;
