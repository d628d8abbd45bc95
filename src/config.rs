use crate::filter::HygieneConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// How indexability treats a page without a canonical link
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalPolicy {
    /// A missing canonical does not block indexing
    #[default]
    AbsentPasses,
    /// A page must declare itself canonical to be indexable
    AbsentFails,
}

/// Configuration for one page analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// URL of the page to analyze
    pub target_url: String,

    /// Maximum number of network checks in flight at once
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,

    /// Per-request timeout for every network check, in seconds
    #[serde(default = "default_check_timeout_secs")]
    pub check_timeout_secs: u64,

    /// Load the page through a WebDriver session instead of a plain HTTP GET
    #[serde(default)]
    pub use_webdriver: bool,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default)]
    pub canonical_policy: CanonicalPolicy,

    /// Path requested on the page's origin to check for a proper 404
    #[serde(default = "default_not_found_path")]
    pub not_found_path: String,

    /// User agent sent with every HTTP request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub hygiene: HygieneConfig,
}

/// Default value for max_concurrency
fn default_max_concurrency() -> usize {
    5
}

/// Default value for check_timeout_secs
fn default_check_timeout_secs() -> u64 {
    10
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default sentinel path for the 404 check
fn default_not_found_path() -> String {
    "page-not-found-seo-check".to_string()
}

/// Default user agent
fn default_user_agent() -> String {
    concat!("seo-signals/", env!("CARGO_PKG_VERSION")).to_string()
}

impl AnalyzerConfig {
    /// Create a new configuration with default values
    pub fn new(target_url: &str) -> Self {
        Self {
            target_url: target_url.to_string(),
            max_concurrency: default_max_concurrency(),
            check_timeout_secs: default_check_timeout_secs(),
            use_webdriver: false,
            webdriver_url: default_webdriver_url(),
            canonical_policy: CanonicalPolicy::default(),
            not_found_path: default_not_found_path(),
            user_agent: default_user_agent(),
            hygiene: HygieneConfig::default(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    pub fn check_timeout(&self) -> Duration {
        Duration::from_secs(self.check_timeout_secs)
    }

    /// Concurrency never drops to zero, which would stall every check
    pub fn effective_concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_minimal_json() {
        let config = AnalyzerConfig::from_json(r#"{"target_url": "https://example.com"}"#).unwrap();
        assert_eq!(config.target_url, "https://example.com");
        assert_eq!(config.max_concurrency, 5);
        assert_eq!(config.check_timeout(), Duration::from_secs(10));
        assert_eq!(config.canonical_policy, CanonicalPolicy::AbsentPasses);
        assert_eq!(config.not_found_path, "page-not-found-seo-check");
        assert!(!config.use_webdriver);
        assert_eq!(config.hygiene.max_length, 100);
    }

    #[test]
    fn test_overrides() {
        let config = AnalyzerConfig::from_json(
            r#"{
                "target_url": "https://example.com",
                "max_concurrency": 0,
                "canonical_policy": "absent_fails",
                "hygiene": {"max_length": 80}
            }"#,
        )
        .unwrap();
        assert_eq!(config.canonical_policy, CanonicalPolicy::AbsentFails);
        assert_eq!(config.effective_concurrency(), 1);
        assert_eq!(config.hygiene.max_length, 80);
        assert_eq!(config.hygiene.disallowed_symbols, vec!["+", "%20", "_"]);
    }

    #[test]
    fn test_missing_target_is_an_error() {
        assert!(AnalyzerConfig::from_json("{}").is_err());
    }
}
