use crate::filter::UrlHygiene;
use crate::results::{PageFacts, is_filled};
use crate::scoring::rules::MIN_WORDS;
use serde::{Deserialize, Serialize};

/// Named pass/fail checks shown alongside the scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckId {
    TitleDefined,
    TitleLength,
    DescriptionDefined,
    DescriptionLength,
    HasH1,
    SingleH1,
    H1Length,
    SufficientContent,
    ImageAlts,
    LanguageSet,
    NoFrames,
    InternalLinksAlive,
    NotFoundStatus,
    CanonicalProvided,
    RobotsPresent,
    ShortUrls,
    Indexable,
    UrlExtensions,
    UrlSymbols,
    LowercaseUrls,
    OpenGraph,
    TwitterCard,
}

impl CheckId {
    /// Question shown next to the result
    pub fn label(&self) -> &'static str {
        match self {
            CheckId::TitleDefined => "Is the page title defined?",
            CheckId::TitleLength => "Is the title length within the optimal range (10-60)?",
            CheckId::DescriptionDefined => "Is the page description defined?",
            CheckId::DescriptionLength => {
                "Is the description length within the optimal range (100-320)?"
            }
            CheckId::HasH1 => "Does the page contain H1 headings?",
            CheckId::SingleH1 => "Is there only one H1 tag on the page?",
            CheckId::H1Length => "Is the H1 length within the optimal range (1-70)?",
            CheckId::SufficientContent => "Is there sufficient content on the page?",
            CheckId::ImageAlts => "Are all image ALT texts provided?",
            CheckId::LanguageSet => "Is a language set for the page?",
            CheckId::NoFrames => "Is the page free of iframes?",
            CheckId::InternalLinksAlive => "Are internal links functioning properly?",
            CheckId::NotFoundStatus => "Do non-existent URLs return a 404 status code?",
            CheckId::CanonicalProvided => "Is a canonical link provided?",
            CheckId::RobotsPresent => "Is a robots meta tag present?",
            CheckId::ShortUrls => "Are all URLs short enough?",
            CheckId::Indexable => "Is the URL indexable?",
            CheckId::UrlExtensions => "Do the URLs avoid file extensions?",
            CheckId::UrlSymbols => "Are the URLs free of symbols?",
            CheckId::LowercaseUrls => "Are all URLs in lowercase?",
            CheckId::OpenGraph => "Is Open Graph data available?",
            CheckId::TwitterCard => "Is Twitter Card data available?",
        }
    }
}

/// Result of one display check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckOutcome {
    pub id: CheckId,
    pub passed: bool,
    /// Offending items (hrefs) for checks over lists of links
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failing: Vec<String>,
}

impl CheckOutcome {
    fn flag(id: CheckId, passed: bool) -> Self {
        Self {
            id,
            passed,
            failing: Vec::new(),
        }
    }

    fn list(id: CheckId, failing: Vec<String>) -> Self {
        Self {
            id,
            passed: failing.is_empty(),
            failing,
        }
    }
}

/// Run every display check against the facts
pub fn run_checks(facts: &PageFacts, hygiene: &UrlHygiene) -> Vec<CheckOutcome> {
    let title_len = facts.title.chars().count();
    let description_len = facts
        .description
        .as_deref()
        .map_or(0, |d| d.chars().count());
    let first_h1_len = facts
        .headings
        .texts(1)
        .first()
        .map_or(0, |h1| h1.chars().count());

    let failing_internal = |bad: fn(&UrlHygiene, &str) -> bool| -> Vec<String> {
        facts
            .links
            .internal
            .iter()
            .filter(|link| bad(hygiene, &link.href))
            .map(|link| link.href.clone())
            .collect()
    };

    vec![
        CheckOutcome::flag(CheckId::TitleDefined, !facts.title.is_empty()),
        CheckOutcome::flag(CheckId::TitleLength, (10..=60).contains(&title_len)),
        CheckOutcome::flag(CheckId::DescriptionDefined, is_filled(&facts.description)),
        CheckOutcome::flag(
            CheckId::DescriptionLength,
            (100..=320).contains(&description_len),
        ),
        CheckOutcome::flag(CheckId::HasH1, facts.headings.count(1) > 0),
        CheckOutcome::flag(CheckId::SingleH1, facts.headings.count(1) == 1),
        CheckOutcome::flag(CheckId::H1Length, (1..=70).contains(&first_h1_len)),
        CheckOutcome::flag(CheckId::SufficientContent, facts.total_words >= MIN_WORDS),
        CheckOutcome::flag(
            CheckId::ImageAlts,
            facts.image_alt_texts.iter().all(is_filled),
        ),
        CheckOutcome::flag(CheckId::LanguageSet, is_filled(&facts.language)),
        CheckOutcome::flag(CheckId::NoFrames, facts.frame_texts.is_empty()),
        CheckOutcome::list(
            CheckId::InternalLinksAlive,
            facts.invalid_internal_links.iter().cloned().collect(),
        ),
        CheckOutcome::flag(CheckId::NotFoundStatus, facts.broken_url_check_passed),
        CheckOutcome::flag(CheckId::CanonicalProvided, is_filled(&facts.canonical_url)),
        CheckOutcome::flag(CheckId::RobotsPresent, is_filled(&facts.robots)),
        CheckOutcome::list(CheckId::ShortUrls, failing_internal(UrlHygiene::is_too_long)),
        CheckOutcome::flag(CheckId::Indexable, facts.indexable),
        CheckOutcome::list(
            CheckId::UrlExtensions,
            failing_internal(UrlHygiene::has_disallowed_extension),
        ),
        CheckOutcome::list(
            CheckId::UrlSymbols,
            failing_internal(UrlHygiene::has_disallowed_symbol),
        ),
        CheckOutcome::list(
            CheckId::LowercaseUrls,
            failing_internal(UrlHygiene::has_uppercase),
        ),
        CheckOutcome::flag(CheckId::OpenGraph, facts.open_graph.is_complete()),
        CheckOutcome::flag(CheckId::TwitterCard, facts.twitter.is_complete()),
    ]
}
