//! Page configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

use tablist_tabs::TabsConfig;

use crate::error::CoreError;
use crate::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Defaults for widgets added without their own configuration
    pub tabs: TabsConfig,
    /// Width assumed until the first measurement arrives
    pub initial_width: u32,
    /// Log filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Document URL that anchor links are resolved against
    pub base_url: String,
}

impl Config {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "Loading configuration");
        Self::from_json_str(&json)
    }

    pub fn base_url(&self) -> Result<Url> {
        Ok(Url::parse(&self.base_url)?)
    }

    fn validate(&self) -> Result<()> {
        if self.log_filter.trim().is_empty() {
            return Err(CoreError::Config("log_filter cannot be empty".to_string()));
        }
        self.base_url()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tabs: TabsConfig::default(),
            initial_width: 1024,
            log_filter: "info".to_string(),
            base_url: "about:blank".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tablist_tabs::Breakpoint;

    #[test]
    fn test_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.tabs.layout_breakpoint, Breakpoint::Unset);
    }

    #[test]
    fn test_nested_tabs_config() {
        let config = Config::from_json_str(
            r#"{
                "initial_width": 480,
                "base_url": "https://docs.example.com/guide",
                "tabs": { "layout_breakpoint": -1, "icon_breakpoint": 320 }
            }"#,
        )
        .unwrap();

        assert_eq!(config.initial_width, 480);
        assert_eq!(config.tabs.layout_breakpoint, Breakpoint::Forced);
        assert_eq!(config.tabs.icon_breakpoint, Breakpoint::Width(320));
        assert_eq!(config.base_url().unwrap().host_str(), Some("docs.example.com"));
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            Config::from_json_str(r#"{"log_filter": " "}"#),
            Err(CoreError::Config(_))
        ));
        assert!(matches!(
            Config::from_json_str(r#"{"base_url": "not a url"}"#),
            Err(CoreError::Url(_))
        ));
        assert!(matches!(
            Config::from_json_str("[1, 2"),
            Err(CoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            Config::load("/nonexistent/tablist.json"),
            Err(CoreError::Io(_))
        ));
    }
}
