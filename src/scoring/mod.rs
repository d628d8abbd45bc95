//! Scoring engine: pure functions from [`PageFacts`] to a [`ScoreReport`].
//!
//! Scoring never fails. Absent or malformed facts simply fail their rules and
//! lower the score.

pub mod checks;
pub mod rules;
pub mod structure;

#[cfg(test)]
mod tests;

use crate::filter::UrlHygiene;
use crate::results::PageFacts;
use serde::{Deserialize, Serialize};

pub use checks::{CheckId, CheckOutcome};
pub use rules::{RULES, Rule, RuleOutcome};
pub use structure::map_range;

/// Scores derived from one [`PageFacts`] record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Sum of the weights of every passing rule, 0..=100
    pub overall: u32,
    /// Title length gauge, 0..=100
    pub title: u32,
    /// Description length gauge, 0..=100
    pub description: u32,
    pub link_structure: u32,
    pub content_depth: u32,
    pub rules: Vec<RuleOutcome>,
    pub checks: Vec<CheckOutcome>,
}

impl ScoreReport {
    /// Outcome of a display check
    pub fn check(&self, id: CheckId) -> Option<&CheckOutcome> {
        self.checks.iter().find(|check| check.id == id)
    }

    /// Outcome of a weighted rule by name
    pub fn rule(&self, name: &str) -> Option<&RuleOutcome> {
        self.rules.iter().find(|rule| rule.name == name)
    }
}

/// Scores pages with a given set of URL hygiene rules
#[derive(Debug, Default)]
pub struct ScoringEngine {
    hygiene: UrlHygiene,
}

impl ScoringEngine {
    pub fn new(hygiene: UrlHygiene) -> Self {
        Self { hygiene }
    }

    pub fn score(&self, facts: &PageFacts) -> ScoreReport {
        score_with(facts, &self.hygiene)
    }
}

/// Score with the default hygiene rules
pub fn score(facts: &PageFacts) -> ScoreReport {
    score_with(facts, UrlHygiene::standard())
}

fn score_with(facts: &PageFacts, hygiene: &UrlHygiene) -> ScoreReport {
    ScoreReport {
        overall: rules::overall_score(facts, hygiene),
        title: structure::title_length_score(facts),
        description: structure::description_length_score(facts),
        link_structure: structure::link_structure_score(facts, hygiene),
        content_depth: structure::content_depth_score(facts),
        rules: rules::evaluate(facts, hygiene),
        checks: checks::run_checks(facts, hygiene),
    }
}

/// Overall weighted score with the default hygiene rules
pub fn calculate_overall_score(facts: &PageFacts) -> u32 {
    rules::overall_score(facts, UrlHygiene::standard())
}

/// Link structure score with the default hygiene rules
pub fn calculate_link_structure_score(facts: &PageFacts) -> u32 {
    structure::link_structure_score(facts, UrlHygiene::standard())
}

pub fn calculate_content_depth_score(facts: &PageFacts) -> u32 {
    structure::content_depth_score(facts)
}
