use crate::error::ScrapeError;
use crate::parsers::{ExtractOptions, TextOptions};
use crate::selectors::{SelectorMode, SelectorSpec};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Browser-like user agent sent with every request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Environment variable that overrides the configured user agent
pub const USER_AGENT_ENV: &str = "SCRAPER_USER_AGENT";

/// Configuration for a scrape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// User-Agent header for the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Named CSS selectors; empty means the default extraction
    #[serde(default)]
    pub selectors: SelectorSpec,

    /// What to do with a selector that fails to parse
    #[serde(default)]
    pub selector_mode: SelectorMode,

    /// Keep non-2xx responses instead of failing the scrape
    #[serde(default)]
    pub allow_error_status: bool,

    /// Collapse whitespace runs inside extracted text
    #[serde(default)]
    pub collapse_whitespace: bool,
}

/// Default value for user_agent
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// Default value for timeout_secs
fn default_timeout_secs() -> u64 {
    10
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
            selectors: SelectorSpec::new(),
            selector_mode: SelectorMode::default(),
            allow_error_status: false,
            collapse_whitespace: false,
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScrapeError> {
        let path = path.as_ref();
        let mut file = File::open(path)
            .map_err(|e| ScrapeError::Config(format!("cannot open {}: {}", path.display(), e)))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, ScrapeError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ScrapeError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks values serde cannot
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.timeout_secs == 0 {
            return Err(ScrapeError::Config(
                "timeout_secs must be greater than zero".to_string(),
            ));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ScrapeError::Config("user_agent must not be empty".to_string()));
        }
        if let Some((name, _)) = self
            .selectors
            .iter()
            .find(|(name, css)| name.trim().is_empty() || css.trim().is_empty())
        {
            return Err(ScrapeError::Config(format!(
                "selector {:?} needs a non-empty name and CSS selector",
                name
            )));
        }
        Ok(())
    }

    /// Replaces the user agent with `user_agent` unless it is missing or blank
    pub fn apply_user_agent_override(&mut self, user_agent: Option<String>) {
        if let Some(user_agent) = user_agent.filter(|ua| !ua.trim().is_empty()) {
            ::log::debug!("Using user agent from {}", USER_AGENT_ENV);
            self.user_agent = user_agent;
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Options for the extraction pass
    pub fn extract_options(&self) -> ExtractOptions {
        ExtractOptions {
            selector_mode: self.selector_mode,
            text: TextOptions {
                collapse_whitespace: self.collapse_whitespace,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScraperConfig::from_json("{}").unwrap();
        assert_eq!(config, ScraperConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert!(config.user_agent.contains("Chrome/91"));
        assert!(config.selectors.is_empty());
        assert_eq!(config.selector_mode, SelectorMode::Isolated);
        assert!(!config.allow_error_status);
    }

    #[test]
    fn test_full_config() {
        let json = r#"{
            "user_agent": "test-agent/1.0",
            "timeout_secs": 3,
            "selectors": {"title": "h1", "items": "li"},
            "selector_mode": "strict",
            "allow_error_status": true,
            "collapse_whitespace": true
        }"#;
        let config = ScraperConfig::from_json(json).unwrap();
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(config.timeout_secs, 3);
        assert_eq!(
            config.selectors.iter().collect::<Vec<_>>(),
            vec![("title", "h1"), ("items", "li")]
        );

        let options = config.extract_options();
        assert_eq!(options.selector_mode, SelectorMode::Strict);
        assert!(options.text.collapse_whitespace);
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let err = ScraperConfig::from_json(r#"{"timeout_secs": 0}"#).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn test_rejects_blank_selector() {
        let err = ScraperConfig::from_json(r#"{"selectors": {"x": "  "}}"#).unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = ScraperConfig::from_json("{not json").unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }

    #[test]
    fn test_user_agent_override() {
        let mut config = ScraperConfig::from_json(r#"{"user_agent": "from-file"}"#).unwrap();

        config.apply_user_agent_override(None);
        assert_eq!(config.user_agent, "from-file");
        config.apply_user_agent_override(Some("   ".to_string()));
        assert_eq!(config.user_agent, "from-file");
        config.apply_user_agent_override(Some("from-env".to_string()));
        assert_eq!(config.user_agent, "from-env");
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = ScraperConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ScrapeError::Config(_)));
    }
}
