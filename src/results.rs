use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Placeholder URL used when no page could be read
pub const SENTINEL_URL: &str = "Something went wrong...";

/// OpenGraph preview tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpenGraph {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl OpenGraph {
    /// True when title, description and image are all non-empty
    pub fn is_complete(&self) -> bool {
        [&self.title, &self.description, &self.image]
            .into_iter()
            .all(is_filled)
    }
}

/// Twitter card tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwitterCard {
    pub card: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
}

impl TwitterCard {
    /// True when card, title, description and image are all non-empty
    pub fn is_complete(&self) -> bool {
        [&self.card, &self.title, &self.description, &self.image]
            .into_iter()
            .all(is_filled)
    }
}

/// Heading texts for h1..h6, in document order.
///
/// Counts are derived from the texts, so a level's count always equals the
/// number of texts recorded for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headings {
    levels: [Vec<String>; 6],
}

impl Headings {
    /// Record a heading at `level` (1..=6). Out-of-range levels are ignored.
    pub fn push(&mut self, level: usize, text: String) {
        if let Some(texts) = level.checked_sub(1).and_then(|i| self.levels.get_mut(i)) {
            texts.push(text);
        }
    }

    /// Texts recorded for `level` (1..=6)
    pub fn texts(&self, level: usize) -> &[String] {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of headings at `level` (1..=6)
    pub fn count(&self, level: usize) -> usize {
        self.texts(level).len()
    }
}

/// One anchor element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkInfo {
    /// The raw `href` attribute
    pub href: String,
    /// Trimmed anchor text, `None` when the anchor has no text
    pub anchor_text: Option<String>,
    /// Whether `rel` contains `nofollow`
    pub is_no_follow: bool,
}

/// Anchors partitioned by href kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    pub internal: Vec<LinkInfo>,
    pub external: Vec<LinkInfo>,
}

impl Links {
    pub fn total(&self) -> usize {
        self.internal.len() + self.external.len()
    }
}

/// Snapshot of every SEO signal read from one page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageFacts {
    /// Resolved document URL, or [`SENTINEL_URL`]
    pub url: String,

    /// Status of re-fetching `url`, 0 if the check did not complete
    pub http_status: u16,

    pub title: String,
    pub description: Option<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub robots: Option<String>,
    pub canonical_url: Option<String>,
    pub language: Option<String>,
    pub keywords: Vec<String>,
    pub headings: Headings,
    pub links: Links,

    /// Internal hrefs that failed the liveness check
    pub invalid_internal_links: BTreeSet<String>,

    /// Whether a made-up path on the same origin answered 404
    pub broken_url_check_passed: bool,

    pub indexable: bool,

    /// One entry per `<img>`; `None` when the element has no `alt` attribute
    pub image_alt_texts: Vec<Option<String>>,

    /// Text content of each `<iframe>`
    pub frame_texts: Vec<String>,

    pub total_words: usize,
    pub total_characters: usize,
    pub total_images: usize,
}

impl PageFacts {
    /// All-default facts reported when the target page could not be read
    pub fn sentinel() -> Self {
        Self {
            url: SENTINEL_URL.to_string(),
            http_status: 0,
            title: String::new(),
            description: None,
            open_graph: OpenGraph::default(),
            twitter: TwitterCard::default(),
            robots: None,
            canonical_url: None,
            language: None,
            keywords: Vec::new(),
            headings: Headings::default(),
            links: Links::default(),
            invalid_internal_links: BTreeSet::new(),
            broken_url_check_passed: false,
            indexable: false,
            image_alt_texts: Vec::new(),
            frame_texts: Vec::new(),
            total_words: 0,
            total_characters: 0,
            total_images: 0,
        }
    }

    /// Whether these facts describe a page that was actually read
    pub fn is_sentinel(&self) -> bool {
        self.url == SENTINEL_URL
    }
}

/// A field counts as filled only when present and non-empty
pub fn is_filled(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
