//! Browser configuration

use serde::{Deserialize, Serialize};

use axiom_webext::SupportConfig;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of tabs opened to host an extension action popup
    pub popup_url: String,
    /// Register extensions the runtime already has installed on startup
    pub restore_installed: bool,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Config {
    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        tracing_subscriber::EnvFilter::try_new(&self.log_filter)
            .map_err(|e| CoreError::Config(format!("log filter {:?}: {e}", self.log_filter)))?;
        Ok(())
    }

    pub fn support_config(&self) -> SupportConfig {
        SupportConfig {
            popup_url: self.popup_url.clone(),
            restore_installed: self.restore_installed,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            popup_url: String::new(),
            restore_installed: true,
            log_filter: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = Config::from_json(r#"{"popup_url": "about:popup"}"#).unwrap();
        assert_eq!(config.popup_url, "about:popup");
        assert!(config.restore_installed);
        assert_eq!(config.log_filter, "info");

        let support = config.support_config();
        assert_eq!(support.popup_url, "about:popup");
        assert!(support.restore_installed);
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            Config::from_json("{"),
            Err(CoreError::Serialization(_))
        ));
        assert!(matches!(
            Config::from_json(r#"{"log_filter": "axiom=loud"}"#),
            Err(CoreError::Config(_))
        ));
    }
}
