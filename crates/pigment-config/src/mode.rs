//! Build mode.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// The build context that conditions transform-chain selection.
///
/// The driver decides the mode (from its own flags or environment) and passes
/// it in; nothing here inspects process arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
        }
    }

    pub fn is_production(self) -> bool {
        self == Mode::Production
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "development" => Ok(Mode::Development),
            "production" => Ok(Mode::Production),
            other => Err(ConfigError::InvalidMode {
                value: other.to_string(),
                location: None,
            }),
        }
    }
}
