use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use url::Url;

/// Where an anchor's href points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Root-relative path on the same site (`/about`)
    Internal,
    /// Absolute http(s) URL, including protocol-relative `//host/...`
    External,
    /// Fragments, `mailto:`, `javascript:`, document-relative paths
    Other,
}

impl LinkKind {
    /// Classify a raw href attribute
    pub fn classify(href: &str) -> Self {
        let href = href.trim();
        if href.starts_with("//") {
            LinkKind::External
        } else if href.starts_with('/') {
            LinkKind::Internal
        } else {
            let lower = href.to_ascii_lowercase();
            if lower.starts_with("http://") || lower.starts_with("https://") {
                LinkKind::External
            } else {
                LinkKind::Other
            }
        }
    }
}

/// Rules an internal URL must satisfy to count as clean
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HygieneConfig {
    /// Extensions that should not appear at the end of a URL
    #[serde(default = "default_disallowed_extensions")]
    pub disallowed_extensions: Vec<String>,

    /// URLs must be strictly shorter than this
    #[serde(default = "default_max_length")]
    pub max_length: usize,

    /// Substrings that should not appear anywhere in a URL
    #[serde(default = "default_disallowed_symbols")]
    pub disallowed_symbols: Vec<String>,
}

fn default_disallowed_extensions() -> Vec<String> {
    ["htm", "html", "shtml", "php", "jsp", "asp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_length() -> usize {
    100
}

fn default_disallowed_symbols() -> Vec<String> {
    ["+", "%20", "_"].iter().map(|s| s.to_string()).collect()
}

impl Default for HygieneConfig {
    fn default() -> Self {
        Self {
            disallowed_extensions: default_disallowed_extensions(),
            max_length: default_max_length(),
            disallowed_symbols: default_disallowed_symbols(),
        }
    }
}

/// Checks internal hrefs against the URL hygiene rules
#[derive(Debug)]
pub struct UrlHygiene {
    config: HygieneConfig,
    extension_regex: Regex,
}

impl Default for UrlHygiene {
    fn default() -> Self {
        Self::new(HygieneConfig::default()).expect("Default extension pattern should be valid")
    }
}

impl UrlHygiene {
    /// Create a checker from configuration
    pub fn new(config: HygieneConfig) -> Result<Self, regex::Error> {
        let alternatives = config
            .disallowed_extensions
            .iter()
            .map(|ext| regex::escape(ext.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join("|");
        let extension_regex = Regex::new(&format!(r"\.({})$", alternatives))?;

        Ok(Self {
            config,
            extension_regex,
        })
    }

    /// Shared checker with the default rules
    pub fn standard() -> &'static UrlHygiene {
        static STANDARD: OnceLock<UrlHygiene> = OnceLock::new();
        STANDARD.get_or_init(UrlHygiene::default)
    }

    /// The URL ends in one of the disallowed extensions
    pub fn has_disallowed_extension(&self, href: &str) -> bool {
        !self.config.disallowed_extensions.is_empty() && self.extension_regex.is_match(href)
    }

    /// The URL is at least `max_length` characters long
    pub fn is_too_long(&self, href: &str) -> bool {
        href.chars().count() >= self.config.max_length
    }

    /// The URL contains `+`, `%20`, `_` or another configured symbol
    pub fn has_disallowed_symbol(&self, href: &str) -> bool {
        self.config
            .disallowed_symbols
            .iter()
            .any(|symbol| href.contains(symbol.as_str()))
    }

    /// The URL differs from its lowercase form
    pub fn has_uppercase(&self, href: &str) -> bool {
        href != href.to_lowercase()
    }

    /// The URL passes every hygiene rule
    pub fn is_clean(&self, href: &str) -> bool {
        !self.has_disallowed_extension(href)
            && !self.is_too_long(href)
            && !self.has_disallowed_symbol(href)
            && !self.has_uppercase(href)
    }
}

/// Resolve an internal href against the page URL for fetching.
///
/// Fragments are dropped so `/a#x` and `/a#y` hit the same resource.
pub fn resolve_internal(page_url: &Url, href: &str) -> Option<Url> {
    let mut resolved = page_url.join(href.trim()).ok()?;
    resolved.set_fragment(None);
    match resolved.scheme() {
        "http" | "https" => Some(resolved),
        _ => None,
    }
}

/// Same-origin path that should not exist on any site
pub fn not_found_probe_url(page_url: &Url, path: &str) -> Option<Url> {
    let origin = page_url.origin();
    if !origin.is_tuple() {
        return None;
    }
    let base = Url::parse(&origin.ascii_serialization()).ok()?;
    base.join(&format!("/{}", path.trim_start_matches('/'))).ok()
}
