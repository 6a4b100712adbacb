use std::path::Path;
use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::mode::AngleMode;
use crate::result::DEFAULT_DECIMALS;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read the configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Calculator settings, read from a TOML file.
///
/// Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Angle mode of a new session
    pub angle_mode: AngleMode,
    /// How long an error stays on the display, in milliseconds
    pub error_reset_ms: u64,
    /// Number of entries shown by the history view
    pub history_view_limit: usize,
    /// Decimal places kept in a result
    pub result_decimals: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::Degrees,
            error_reset_ms: 1500,
            history_view_limit: 10,
            result_decimals: DEFAULT_DECIMALS,
        }
    }
}

impl Config {
    pub fn from_toml(text: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        debug!("loading configuration from {}", path.display());
        let text = std::fs::read_to_string(path)?;
        Config::from_toml(&text)
    }

    pub fn error_reset_delay(&self) -> Duration {
        Duration::from_millis(self.error_reset_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_uses_defaults_for_missing_fields() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());

        let config = Config::from_toml("angle_mode = \"radians\"\nerror_reset_ms = 200").unwrap();
        assert_eq!(config.angle_mode, AngleMode::Radians);
        assert_eq!(config.error_reset_delay(), Duration::from_millis(200));
        assert_eq!(config.history_view_limit, 10);
        assert_eq!(config.result_decimals, 10);
    }

    #[test]
    fn it_rejects_bad_files() {
        assert!(matches!(
            Config::from_toml("angle_mode = \"gradians\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::from_toml("theme = \"neon\""),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            Config::load("/nonexistent/ultracalc.toml"),
            Err(ConfigError::Io(_))
        ));
    }
}
