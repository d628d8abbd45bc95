use crate::filter::LinkKind;
use crate::parsers::text::{self, BodyText};
use crate::results::{Headings, LinkInfo, Links, OpenGraph, TwitterCard};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Everything readable from the static DOM, before any network check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomSignals {
    pub title: String,
    pub description: Option<String>,
    pub robots: Option<String>,
    pub keywords: Vec<String>,
    /// Raw `href` of the canonical link, unresolved
    pub canonical_href: Option<String>,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    pub language: Option<String>,
    pub headings: Headings,
    pub links: Links,
    pub image_alt_texts: Vec<Option<String>>,
    pub frame_texts: Vec<String>,
    pub body: BodyText,
}

macro_rules! selector {
    ($css:literal) => {{
        static SELECTOR: OnceLock<Selector> = OnceLock::new();
        SELECTOR.get_or_init(|| Selector::parse($css).expect(concat!("valid selector: ", $css)))
    }};
}

/// Parses an HTML document into its SEO signals
pub fn parse(html: &str) -> DomSignals {
    let doc = Html::parse_document(html);
    let meta = MetaTags::collect(&doc);

    let signals = DomSignals {
        title: title(&doc),
        description: meta.get("description"),
        robots: meta.get("robots"),
        keywords: meta
            .get("keywords")
            .map(|content| split_keywords(&content))
            .unwrap_or_default(),
        canonical_href: canonical_href(&doc),
        open_graph: OpenGraph {
            title: meta.get("og:title"),
            description: meta.get("og:description"),
            image: meta.get("og:image"),
        },
        twitter: TwitterCard {
            card: meta.get("twitter:card"),
            title: meta.get("twitter:title"),
            description: meta.get("twitter:description"),
            image: meta.get("twitter:image"),
        },
        language: doc
            .root_element()
            .value()
            .attr("lang")
            .map(|lang| lang.trim().to_string()),
        headings: headings(&doc),
        links: links(&doc),
        image_alt_texts: doc
            .select(selector!("img"))
            .map(|img| img.value().attr("alt").map(str::to_string))
            .collect(),
        frame_texts: doc
            .select(selector!("iframe"))
            .map(|frame| element_text(&frame))
            .collect(),
        body: text::body_text(&doc),
    };

    ::log::debug!(
        "HTML parser found {} internal and {} external links, {} images",
        signals.links.internal.len(),
        signals.links.external.len(),
        signals.image_alt_texts.len()
    );

    signals
}

/// `<meta>` contents keyed by lowercased `name` or `property`; first tag wins
struct MetaTags(HashMap<String, String>);

impl MetaTags {
    fn collect(doc: &Html) -> Self {
        let mut tags = HashMap::new();
        for element in doc.select(selector!("meta[content]")) {
            let attrs = element.value();
            let Some(content) = attrs.attr("content") else {
                continue;
            };
            for key in [attrs.attr("name"), attrs.attr("property")].into_iter().flatten() {
                tags.entry(key.trim().to_ascii_lowercase())
                    .or_insert_with(|| content.trim().to_string());
            }
        }
        Self(tags)
    }

    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }
}

fn title(doc: &Html) -> String {
    doc.select(selector!("title"))
        .next()
        .map(|el| text::normalize_whitespace(&el.text().collect::<String>()))
        .unwrap_or_default()
}

fn canonical_href(doc: &Html) -> Option<String> {
    doc.select(selector!("link[rel][href]"))
        .find(|link| {
            link.value()
                .attr("rel")
                .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("canonical")))
        })
        .and_then(|link| link.value().attr("href"))
        .map(|href| href.trim().to_string())
}

/// Comma-separated keywords, trimmed, empty entries dropped
pub fn split_keywords(content: &str) -> Vec<String> {
    content
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}

fn headings(doc: &Html) -> Headings {
    let mut headings = Headings::default();
    for element in doc.select(selector!("h1, h2, h3, h4, h5, h6")) {
        let level = element.value().name()[1..].parse::<usize>().unwrap_or(0);
        headings.push(level, element_text(&element));
    }
    headings
}

fn links(doc: &Html) -> Links {
    let mut links = Links::default();
    for anchor in doc.select(selector!("a[href]")) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let info = LinkInfo {
            href: href.trim().to_string(),
            anchor_text: Some(element_text(&anchor)).filter(|text| !text.is_empty()),
            is_no_follow: anchor.value().attr("rel").is_some_and(|rel| {
                rel.split_whitespace()
                    .any(|r| r.eq_ignore_ascii_case("nofollow"))
            }),
        };
        match LinkKind::classify(href) {
            LinkKind::Internal => links.internal.push(info),
            LinkKind::External => links.external.push(info),
            LinkKind::Other => ::log::trace!("Skipping non-page link: {}", href),
        }
    }
    links
}

fn element_text(element: &ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
