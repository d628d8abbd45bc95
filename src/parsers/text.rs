use scraper::{ElementRef, Html, Selector};
use std::sync::OnceLock;

/// Elements whose text never reaches the rendered page
const HIDDEN_TEXT_ELEMENTS: [&str; 5] = ["script", "style", "noscript", "template", "iframe"];

/// Elements that start a new line of rendered text
const BLOCK_ELEMENTS: [&str; 41] = [
    "address", "article", "aside", "blockquote", "br", "caption", "dd", "details", "dialog",
    "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3",
    "h4", "h5", "h6", "header", "hgroup", "hr", "li", "main", "nav", "ol", "p", "pre",
    "section", "summary", "table", "td", "th", "tr", "ul", "option", "legend",
];

/// Visible body text and the counts derived from it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BodyText {
    /// Whitespace-collapsed, trimmed text of `<body>`
    pub text: String,
    pub words: usize,
    pub characters: usize,
}

impl BodyText {
    /// Build counts from an already extracted text snapshot
    pub fn from_text(raw: &str) -> Self {
        let text = normalize_whitespace(raw);
        Self {
            words: count_words(&text),
            characters: text.chars().count(),
            text,
        }
    }
}

/// Read the visible text of the document body
pub fn body_text(doc: &Html) -> BodyText {
    static BODY: OnceLock<Selector> = OnceLock::new();
    let selector = BODY.get_or_init(|| Selector::parse("body").expect("valid body selector"));

    let mut raw = String::new();
    if let Some(body) = doc.select(selector).next() {
        collect_visible_text(body, &mut raw);
    }

    BodyText::from_text(&raw)
}

/// Text nodes are concatenated as rendered; only block boundaries separate
/// them, so inline markup never splits a word.
fn collect_visible_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let name = child_element.value().name();
            if HIDDEN_TEXT_ELEMENTS.contains(&name) {
                continue;
            }
            let block = BLOCK_ELEMENTS.contains(&name);
            if block {
                out.push(' ');
            }
            collect_visible_text(child_element, out);
            if block {
                out.push(' ');
            }
        }
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Count whitespace-separated, non-empty tokens
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
