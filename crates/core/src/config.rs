//! Runtime configuration.

use crate::catalog::OptionCatalog;
use crate::error::{DeskError, DeskResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable overriding [`DeskConfig::api_url`].
pub const API_URL_ENV: &str = "COACHDESK_API_URL";

/// Tabs of the workbook that are not classes.
pub const DEFAULT_IGNORED_TABS: [&str; 10] = [
    "Instruction Guide",
    "Campus Data",
    "Coders' Data",
    "Point Rewards",
    "Point Data",
    "Assessment Data",
    "Drop & Postpone",
    "Achievement Done",
    "Coach Name",
    "Coaches Account",
];

/// Settings read from a YAML file; every key is optional.
///
/// ```yaml
/// api_url: https://script.example.com/exec
/// timeout_secs: 20
/// ignored_tabs: [Instruction Guide, Archive]
/// catalog:
///   levels: [Rookie, Trainee]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    pub api_url: Option<String>,
    pub timeout_secs: u64,
    pub ignored_tabs: Vec<String>,
    pub catalog: OptionCatalog,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            api_url: None,
            timeout_secs: 30,
            ignored_tabs: DEFAULT_IGNORED_TABS.iter().map(|s| (*s).to_string()).collect(),
            catalog: OptionCatalog::default(),
        }
    }
}

impl DeskConfig {
    /// Load configuration from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> DeskResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_yaml(&text)
    }

    /// Parse configuration from YAML text. Empty text yields defaults.
    pub fn from_yaml(text: &str) -> DeskResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        if config.timeout_secs == 0 {
            return Err(DeskError::Config("timeout_secs must be positive".to_string()));
        }
        Ok(config)
    }

    /// Apply `COACHDESK_API_URL` when set and non-empty.
    #[must_use]
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok())
    }

    /// Replace the endpoint URL when `url` holds a non-empty value.
    #[must_use]
    pub fn with_api_url_override(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.api_url = Some(url);
        }
        self
    }

    /// The endpoint URL, or a configuration error when unset.
    pub fn require_api_url(&self) -> DeskResult<&str> {
        self.api_url
            .as_deref()
            .ok_or_else(|| DeskError::Config("API URL not configured".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = DeskConfig::default();
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.ignored_tabs.len(), 10);
        assert!(matches!(
            config.require_api_url(),
            Err(DeskError::Config(msg)) if msg.contains("not configured")
        ));
    }

    #[test]
    fn test_from_yaml_partial() {
        let config =
            DeskConfig::from_yaml("api_url: https://example.test/exec\ntimeout_secs: 5\n").unwrap();
        assert_eq!(config.require_api_url().unwrap(), "https://example.test/exec");
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.catalog, OptionCatalog::default());
    }

    #[test]
    fn test_from_yaml_rejects_zero_timeout() {
        assert!(matches!(
            DeskConfig::from_yaml("timeout_secs: 0"),
            Err(DeskError::Config(_))
        ));
        assert!(matches!(
            DeskConfig::from_yaml("timeout_secs: soon"),
            Err(DeskError::Yaml(_))
        ));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(DeskConfig::from_yaml("  \n").unwrap(), DeskConfig::default());
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "ignored_tabs: [Archive]").unwrap();
        let config = DeskConfig::load(file.path()).unwrap();
        assert_eq!(config.ignored_tabs, vec!["Archive"]);
    }

    #[test]
    fn test_api_url_override() {
        let config = DeskConfig::default()
            .with_api_url_override(Some("https://a.test".to_string()))
            .with_api_url_override(Some("   ".to_string()))
            .with_api_url_override(None);
        assert_eq!(config.api_url.as_deref(), Some("https://a.test"));
    }
}
