//! Flat request/response messages exchanged between the extractor and its
//! consumer, and the single place where wire payloads become [`PageFacts`].

use crate::config::AnalyzerConfig;
use crate::extractor;
use crate::probe::StatusProbe;
use crate::results::{Headings, LinkInfo, Links, OpenGraph, PageFacts, SENTINEL_URL, TwitterCard};
use crate::target::TargetPage;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Action name of the only supported request
pub const ANALYZE_PAGE: &str = "analyzePage";

/// `{"action": "analyzePage"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    pub action: String,
}

impl AnalyzeRequest {
    pub fn analyze_page() -> Self {
        Self {
            action: ANALYZE_PAGE.to_string(),
        }
    }

    pub fn is_analyze_page(&self) -> bool {
        self.action == ANALYZE_PAGE
    }
}

impl Default for AnalyzeRequest {
    fn default() -> Self {
        Self::analyze_page()
    }
}

/// One anchor on the wire
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WireLink {
    pub href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub has_no_follow: bool,
}

/// The flat response payload. Every key may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PagePayload {
    pub url: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Vec<String>,
    #[serde(rename = "robotsMetaT")]
    pub robots_meta: Option<String>,
    #[serde(rename = "canonicalURL")]
    pub canonical_url: Option<String>,
    pub og_title: Option<String>,
    pub og_description: Option<String>,
    pub og_image: Option<String>,
    pub tt_card: Option<String>,
    pub tt_title: Option<String>,
    pub tt_description: Option<String>,
    pub tt_image: Option<String>,
    pub language: Option<String>,
    pub h1_elements: usize,
    pub h2_elements: usize,
    pub h3_elements: usize,
    pub h4_elements: usize,
    pub h5_elements: usize,
    pub h6_elements: usize,
    pub h1_content: Vec<String>,
    pub h2_content: Vec<String>,
    pub h3_content: Vec<String>,
    pub h4_content: Vec<String>,
    pub h5_content: Vec<String>,
    pub h6_content: Vec<String>,
    pub total_words: usize,
    pub total_characters: usize,
    pub total_images: usize,
    pub internal_links: Vec<WireLink>,
    pub external_links: Vec<WireLink>,
    pub invalid_links: Vec<String>,
    pub is_broken_url: bool,
    pub http_status: u16,
    pub is_indexable: bool,
    pub img_alts: Vec<Option<String>>,
    pub frames: Vec<String>,
}

impl PagePayload {
    /// Payload sent when the target page could not be read
    pub fn sentinel() -> Self {
        Self::from(&PageFacts::sentinel())
    }

    fn heading_parts(&self) -> [(usize, &Vec<String>); 6] {
        [
            (self.h1_elements, &self.h1_content),
            (self.h2_elements, &self.h2_content),
            (self.h3_elements, &self.h3_content),
            (self.h4_elements, &self.h4_content),
            (self.h5_elements, &self.h5_content),
            (self.h6_elements, &self.h6_content),
        ]
    }
}

impl From<&LinkInfo> for WireLink {
    fn from(link: &LinkInfo) -> Self {
        Self {
            href: link.href.clone(),
            content: link.anchor_text.clone(),
            has_no_follow: link.is_no_follow,
        }
    }
}

impl From<WireLink> for LinkInfo {
    fn from(link: WireLink) -> Self {
        Self {
            href: link.href,
            anchor_text: link.content.filter(|text| !text.is_empty()),
            is_no_follow: link.has_no_follow,
        }
    }
}

impl From<&PageFacts> for PagePayload {
    fn from(facts: &PageFacts) -> Self {
        let count = |level| facts.headings.count(level);
        let texts = |level| facts.headings.texts(level).to_vec();

        Self {
            url: Some(facts.url.clone()),
            title: Some(facts.title.clone()),
            description: facts.description.clone(),
            keywords: facts.keywords.clone(),
            robots_meta: facts.robots.clone(),
            canonical_url: facts.canonical_url.clone(),
            og_title: facts.open_graph.title.clone(),
            og_description: facts.open_graph.description.clone(),
            og_image: facts.open_graph.image.clone(),
            tt_card: facts.twitter.card.clone(),
            tt_title: facts.twitter.title.clone(),
            tt_description: facts.twitter.description.clone(),
            tt_image: facts.twitter.image.clone(),
            language: facts.language.clone(),
            h1_elements: count(1),
            h2_elements: count(2),
            h3_elements: count(3),
            h4_elements: count(4),
            h5_elements: count(5),
            h6_elements: count(6),
            h1_content: texts(1),
            h2_content: texts(2),
            h3_content: texts(3),
            h4_content: texts(4),
            h5_content: texts(5),
            h6_content: texts(6),
            total_words: facts.total_words,
            total_characters: facts.total_characters,
            total_images: facts.total_images,
            internal_links: facts.links.internal.iter().map(WireLink::from).collect(),
            external_links: facts.links.external.iter().map(WireLink::from).collect(),
            invalid_links: facts.invalid_internal_links.iter().cloned().collect(),
            is_broken_url: facts.broken_url_check_passed,
            http_status: facts.http_status,
            is_indexable: facts.indexable,
            img_alts: facts.image_alt_texts.clone(),
            frames: facts.frame_texts.clone(),
        }
    }
}

/// Normalize a received payload. Missing keys become absent markers or zero
/// values; heading texts are authoritative and padded with blank entries
/// when a producer reports a larger count than it sent texts.
impl From<PagePayload> for PageFacts {
    fn from(payload: PagePayload) -> Self {
        let mut headings = Headings::default();
        for (index, (count, texts)) in payload.heading_parts().into_iter().enumerate() {
            let level = index + 1;
            for text in texts {
                headings.push(level, text.clone());
            }
            for _ in texts.len()..count {
                headings.push(level, String::new());
            }
        }

        let links = Links {
            internal: payload.internal_links.into_iter().map(LinkInfo::from).collect(),
            external: payload.external_links.into_iter().map(LinkInfo::from).collect(),
        };

        // Invalid links must be a subset of the internal hrefs
        let invalid_internal_links = payload
            .invalid_links
            .into_iter()
            .filter(|href| links.internal.iter().any(|link| &link.href == href))
            .collect();

        PageFacts {
            url: payload
                .url
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| SENTINEL_URL.to_string()),
            http_status: payload.http_status,
            title: payload.title.unwrap_or_default(),
            description: payload.description,
            open_graph: OpenGraph {
                title: payload.og_title,
                description: payload.og_description,
                image: payload.og_image,
            },
            twitter: TwitterCard {
                card: payload.tt_card,
                title: payload.tt_title,
                description: payload.tt_description,
                image: payload.tt_image,
            },
            robots: payload.robots_meta,
            canonical_url: payload.canonical_url,
            language: payload.language,
            keywords: payload.keywords,
            headings,
            links,
            invalid_internal_links,
            broken_url_check_passed: payload.is_broken_url,
            indexable: payload.is_indexable,
            image_alt_texts: payload.img_alts,
            frame_texts: payload.frames,
            total_words: payload.total_words,
            total_characters: payload.total_characters,
            total_images: payload.total_images,
        }
    }
}

/// Answer one request. Always produces a payload: a target that cannot be
/// read yields the sentinel payload.
pub async fn respond(
    request: &AnalyzeRequest,
    target: &dyn TargetPage,
    probe: Arc<dyn StatusProbe>,
    config: &AnalyzerConfig,
) -> PagePayload {
    if !request.is_analyze_page() {
        ::log::warn!("Ignoring unknown action: {}", request.action);
        return PagePayload::sentinel();
    }

    match extractor::extract(target, probe, config).await {
        Ok(facts) => PagePayload::from(&facts),
        Err(e) => {
            ::log::error!("Extraction failed: {}", e);
            PagePayload::sentinel()
        }
    }
}
