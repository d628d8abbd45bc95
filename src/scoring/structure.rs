use crate::filter::UrlHygiene;
use crate::results::PageFacts;
use crate::scoring::rules::MIN_WORDS;

/// Clamp `value` into `[in_min, in_max]`, map it linearly onto
/// `[out_min, out_max]` and round.
///
/// A degenerate input range maps everything to `out_max`.
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> u32 {
    let (low, high) = (out_min.min(out_max), out_min.max(out_max));
    if in_max <= in_min {
        return to_score(out_max);
    }
    let value = if value.is_finite() { value.clamp(in_min, in_max) } else { in_min };
    let mapped = ((value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min).round();
    to_score(mapped.clamp(low, high))
}

fn to_score(value: f64) -> u32 {
    if value.is_finite() { value.max(0.0) as u32 } else { 0 }
}

/// Title length gauge: 50 characters or more scores 100
pub fn title_length_score(facts: &PageFacts) -> u32 {
    map_range(facts.title.chars().count() as f64, 0.0, 50.0, 0.0, 100.0)
}

/// Description length gauge: 150 characters or more scores 100
pub fn description_length_score(facts: &PageFacts) -> u32 {
    let length = facts.description.as_deref().map_or(0, |d| d.chars().count());
    map_range(length as f64, 0.0, 150.0, 0.0, 100.0)
}

/// Scores the link profile of a page, clamped to [0, 100].
///
/// | Factor | Half credit | Full credit |
/// |---|---|---|
/// | internal links (30) | 3–5 | 6–10 |
/// | external links (20) | 4–5 | 1–3 |
/// | internal share of all links (20) | ≥ 50% | ≥ 70% |
/// | clean internal URLs (30) | ≥ 50% | ≥ 70% |
pub fn link_structure_score(facts: &PageFacts, hygiene: &UrlHygiene) -> u32 {
    let internal = facts.links.internal.len();
    let external = facts.links.external.len();
    let mut score = 0;

    score += match internal {
        3..=5 => 15,
        6..=10 => 30,
        _ => 0,
    };

    score += match external {
        1..=3 => 20,
        4..=5 => 10,
        _ => 0,
    };

    let internal_ratio = ratio(internal, internal + external);
    if internal_ratio >= 0.7 {
        score += 20;
    } else if internal_ratio >= 0.5 {
        score += 10;
    }

    let clean = facts
        .links
        .internal
        .iter()
        .filter(|link| hygiene.is_clean(&link.href))
        .count();
    let clean_ratio = ratio(clean, internal);
    if clean_ratio >= 0.7 {
        score += 30;
    } else if clean_ratio >= 0.5 {
        score += 15;
    }

    score.min(100)
}

/// Scores content depth: words (30), an H1 (20), two H2s (20), two H3s (20)
/// and at least one image (10).
pub fn content_depth_score(facts: &PageFacts) -> u32 {
    let factors: [(bool, u32); 5] = [
        (facts.total_words >= MIN_WORDS, 30),
        (facts.headings.count(1) >= 1, 20),
        (facts.headings.count(2) >= 2, 20),
        (facts.headings.count(3) >= 2, 20),
        (facts.total_images > 0, 10),
    ];

    factors
        .iter()
        .filter(|(passed, _)| *passed)
        .map(|(_, weight)| weight)
        .sum::<u32>()
        .min(100)
}

/// `part / whole`, or 0 when `whole` is 0
fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
