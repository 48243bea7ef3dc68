//! Error reporting and diagnostic messages for pigment.
//!
//! Configuration problems are reported as structured diagnostics rather than
//! bare strings, so a build driver can render them for a terminal, forward
//! them as JSON, or decide which ones abort a build.
//!
//! - [`DiagnosticMessage`]: title, kind, problem statement, details and hints
//! - [`DiagnosticMessageBuilder`]: tidyverse-style builder for the above
//! - [`DiagnosticKind`]: Error or Warning
//! - [`SourceInfo`]: where in a configuration file a value was declared
//! - [`SourceContext`]: source texts, so located diagnostics can be rendered
//!   as ariadne snippets
//! - [`catalog`]: the embedded table of stable error codes (`P-<subsystem>-<n>`)
//!
//! # Example
//!
//! ```
//! use pigment_error_reporting::DiagnosticMessageBuilder;
//!
//! let warning = DiagnosticMessageBuilder::warning("Duplicate output path")
//!     .with_code("P-3-2")
//!     .problem("Two injection targets write `index.html`")
//!     .add_detail("Target 0 is overwritten by target 1")
//!     .build();
//!
//! assert!(warning.to_text(None).starts_with("Warning [P-3-2]"));
//! ```

pub mod builder;
pub mod catalog;
pub mod diagnostic;
pub mod source_context;
pub mod source_info;

pub use builder::DiagnosticMessageBuilder;
pub use catalog::{ERROR_CATALOG, ErrorCodeInfo, get_error_info};
pub use diagnostic::{DetailItem, DetailKind, DiagnosticKind, DiagnosticMessage};
pub use source_context::{SourceContext, SourceFile};
pub use source_info::SourceInfo;
