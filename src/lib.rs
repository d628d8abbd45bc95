// Re-export modules
pub mod config;
pub mod error;
pub mod extractor;
pub mod filter;
pub mod parsers;
pub mod probe;
pub mod protocol;
pub mod results;
pub mod scoring;
pub mod session;
pub mod target;

// Re-export commonly used types for convenience
pub use config::{AnalyzerConfig, CanonicalPolicy};
pub use error::{ExtractionError, ProbeError};
pub use results::{LinkInfo, PageFacts, SENTINEL_URL};
pub use scoring::{ScoreReport, ScoringEngine};

use filter::UrlHygiene;
use probe::{HttpProbe, StatusProbe};
use std::sync::Arc;
use target::{HttpPage, TargetPage, WebDriverPage};

/// Facts and scores of one analyzed page
#[derive(Debug, Clone, serde::Serialize)]
pub struct Analysis {
    pub facts: PageFacts,
    pub report: ScoreReport,
}

/// Main builder for analyzing one page
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// Create a new analyzer for the given URL with default settings
    pub fn new(url: &str) -> Self {
        Self {
            config: AnalyzerConfig::new(url),
        }
    }

    /// Set the maximum number of concurrent network checks
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.config.max_concurrency = max_concurrency;
        self
    }

    /// Set the per-check timeout
    pub fn with_check_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.check_timeout_secs = timeout_seconds;
        self
    }

    /// Set how a missing canonical link affects indexability
    pub fn with_canonical_policy(mut self, policy: CanonicalPolicy) -> Self {
        self.config.canonical_policy = policy;
        self
    }

    /// Read the page through a WebDriver server instead of a plain GET
    pub fn with_webdriver(mut self, webdriver_url: Option<String>) -> Self {
        self.config.use_webdriver = true;
        if let Some(url) = webdriver_url {
            self.config.webdriver_url = url;
        }
        self
    }

    /// Replace the whole configuration, keeping the target URL when the
    /// configuration leaves it empty
    pub fn with_config(mut self, mut config: AnalyzerConfig) -> Self {
        if config.target_url.is_empty() {
            config.target_url = self.config.target_url.clone();
        }
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AnalyzerConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AnalyzerConfig::from_json(config_str)?;
        Ok(self.with_config(config))
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Extract and score the page.
    ///
    /// An unreachable page still produces an analysis of the sentinel facts.
    pub async fn run(self) -> Result<Analysis, Box<dyn std::error::Error>> {
        let mut config = self.config;

        // Override the WebDriver URL with an environment variable if provided
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                config.webdriver_url = webdriver_url;
            }
        }

        let hygiene = UrlHygiene::new(config.hygiene.clone())?;
        let client = probe::build_client(&config.user_agent, config.check_timeout())?;
        let probe: Arc<dyn StatusProbe> = Arc::new(HttpProbe::new(client.clone()));

        let target: Box<dyn TargetPage> = if config.use_webdriver {
            Box::new(WebDriverPage::new(&config.webdriver_url, &config.target_url))
        } else {
            Box::new(HttpPage::new(client, &config.target_url))
        };

        let facts = match extractor::extract(target.as_ref(), probe, &config).await {
            Ok(facts) => facts,
            Err(e) => {
                ::log::error!("Failed to analyze {}: {}", config.target_url, e);
                PageFacts::sentinel()
            }
        };

        let report = ScoringEngine::new(hygiene).score(&facts);
        ::log::info!(
            "Scored {}: overall {}, link structure {}, content depth {}",
            facts.url,
            report.overall,
            report.link_structure,
            report.content_depth
        );

        Ok(Analysis { facts, report })
    }
}
