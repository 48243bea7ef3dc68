//! Error code catalog and lookup.
//!
//! Maps error codes (like "P-2-2") to their subsystem, title and problem
//! statement. The catalog is embedded at compile time from `error_catalog.json`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Metadata for an error code.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorCodeInfo {
    /// Subsystem name (e.g., "config", "theme", "pipeline")
    pub subsystem: String,

    /// Short title for the error
    pub title: String,

    /// General problem statement; the specifics go in diagnostic details
    pub message_template: String,
}

/// Global error catalog, loaded lazily from the embedded JSON.
///
/// # Panics
///
/// Panics on first access if the embedded JSON is invalid.
pub static ERROR_CATALOG: Lazy<HashMap<String, ErrorCodeInfo>> = Lazy::new(|| {
    let json_data = include_str!("../error_catalog.json");
    serde_json::from_str(json_data).expect("Invalid error catalog JSON - this is a bug in pigment")
});

/// Look up error code information.
///
/// # Example
///
/// ```
/// use pigment_error_reporting::catalog::get_error_info;
///
/// let info = get_error_info("P-2-2").unwrap();
/// assert_eq!(info.title, "Unknown Variant");
/// ```
pub fn get_error_info(code: &str) -> Option<&'static ErrorCodeInfo> {
    ERROR_CATALOG.get(code)
}
