use crate::filter::UrlHygiene;
use crate::results::{PageFacts, is_filled};
use serde::{Deserialize, Serialize};

/// Minimum body word count for a page to count as substantial
pub const MIN_WORDS: usize = 300;

/// One weighted rule of the overall score
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub name: &'static str,
    pub weight: u32,
    pub passes: fn(&PageFacts, &UrlHygiene) -> bool,
}

/// Result of evaluating one rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    pub name: String,
    pub weight: u32,
    pub passed: bool,
}

/// The overall score rules. Weights sum to 100 so the score is a percentage.
pub const RULES: [Rule; 15] = [
    Rule {
        name: "title",
        weight: 8,
        passes: |facts, _| !facts.title.is_empty(),
    },
    Rule {
        name: "description",
        weight: 7,
        passes: |facts, _| is_filled(&facts.description),
    },
    Rule {
        name: "url",
        weight: 5,
        passes: |facts, _| !facts.url.is_empty() && !facts.is_sentinel(),
    },
    Rule {
        name: "h1",
        weight: 5,
        passes: |facts, _| facts.headings.count(1) > 0,
    },
    Rule {
        name: "content",
        weight: 8,
        passes: |facts, _| facts.total_words >= MIN_WORDS,
    },
    Rule {
        name: "image_alts",
        weight: 4,
        passes: |facts, _| {
            !facts.image_alt_texts.is_empty() && facts.image_alt_texts.iter().all(is_filled)
        },
    },
    Rule {
        name: "internal_links",
        weight: 10,
        passes: |facts, _| !facts.links.internal.is_empty(),
    },
    Rule {
        name: "external_links",
        weight: 5,
        passes: |facts, _| !facts.links.external.is_empty(),
    },
    Rule {
        name: "robots",
        weight: 10,
        passes: |facts, _| is_filled(&facts.robots),
    },
    Rule {
        name: "indexable",
        weight: 8,
        passes: |facts, _| facts.indexable,
    },
    Rule {
        name: "canonical",
        weight: 5,
        passes: |facts, _| is_filled(&facts.canonical_url),
    },
    Rule {
        name: "language",
        weight: 5,
        passes: |facts, _| is_filled(&facts.language),
    },
    Rule {
        name: "url_hygiene",
        weight: 10,
        passes: |facts, hygiene| {
            !facts.links.internal.is_empty()
                && facts
                    .links
                    .internal
                    .iter()
                    .all(|link| hygiene.is_clean(&link.href))
        },
    },
    Rule {
        name: "open_graph",
        weight: 5,
        passes: |facts, _| facts.open_graph.is_complete(),
    },
    Rule {
        name: "twitter_card",
        weight: 5,
        passes: |facts, _| facts.twitter.is_complete(),
    },
];

/// Sum of every rule weight
pub fn total_weight() -> u32 {
    RULES.iter().map(|rule| rule.weight).sum()
}

/// Evaluate every rule in order
pub fn evaluate(facts: &PageFacts, hygiene: &UrlHygiene) -> Vec<RuleOutcome> {
    RULES
        .iter()
        .map(|rule| RuleOutcome {
            name: rule.name.to_string(),
            weight: rule.weight,
            passed: (rule.passes)(facts, hygiene),
        })
        .collect()
}

/// Sum of the weights of every passing rule, in [0, 100]
pub fn overall_score(facts: &PageFacts, hygiene: &UrlHygiene) -> u32 {
    RULES
        .iter()
        .filter(|rule| (rule.passes)(facts, hygiene))
        .map(|rule| rule.weight)
        .sum()
}
