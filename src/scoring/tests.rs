use super::*;
use crate::results::{LinkInfo, OpenGraph, TwitterCard};

fn link(href: &str) -> LinkInfo {
    LinkInfo {
        href: href.to_string(),
        anchor_text: Some("text".to_string()),
        is_no_follow: false,
    }
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

/// A page that satisfies every weighted rule
fn complete_page() -> PageFacts {
    let mut facts = PageFacts::sentinel();
    facts.url = "https://example.com/guide".to_string();
    facts.http_status = 200;
    facts.title = "t".repeat(55);
    facts.description = Some("d".repeat(155));
    facts.headings.push(1, "Guide".to_string());
    facts.total_words = 320;
    facts.total_characters = 1900;
    facts.links.internal = ["/", "/guide", "/about", "/blog", "/contact"]
        .iter()
        .map(|href| link(href))
        .collect();
    facts.links.external = vec![link("https://a.org"), link("https://b.org")];
    facts.robots = some("index, follow");
    facts.indexable = true;
    facts.canonical_url = some("https://example.com/guide");
    facts.language = some("en");
    facts.open_graph = OpenGraph {
        title: some("OG"),
        description: some("OG description"),
        image: some("https://example.com/og.png"),
    };
    facts.twitter = TwitterCard {
        card: some("summary"),
        title: some("TW"),
        description: some("TW description"),
        image: some("https://example.com/tw.png"),
    };
    facts.image_alt_texts = vec![some("Diagram")];
    facts.total_images = 1;
    facts
}

/// All-default facts as a consumer renders them before any data arrives
fn empty_page() -> PageFacts {
    let mut facts = PageFacts::sentinel();
    facts.description = some("");
    facts.robots = some("");
    facts.language = some("");
    facts.canonical_url = some("");
    facts.open_graph = OpenGraph {
        title: some(""),
        description: some(""),
        image: some(""),
    };
    facts.twitter = TwitterCard {
        card: some(""),
        title: some(""),
        description: some(""),
        image: some(""),
    };
    facts
}

#[test]
fn test_rule_weights_sum_to_100() {
    assert_eq!(rules::total_weight(), 100);
    assert_eq!(RULES.len(), 15);
}

#[test]
fn test_empty_page_scores_zero() {
    let facts = empty_page();
    assert_eq!(calculate_overall_score(&facts), 0);
    assert_eq!(calculate_overall_score(&PageFacts::sentinel()), 0);

    let report = score(&facts);
    assert!(report.rules.iter().all(|rule| !rule.passed));
    assert_eq!(report.link_structure, 0);
    assert_eq!(report.content_depth, 0);
    assert_eq!(report.title, 0);
    assert_eq!(report.description, 0);
}

#[test]
fn test_complete_page_scores_100() {
    let facts = complete_page();
    assert_eq!(calculate_overall_score(&facts), 100);

    let report = score(&facts);
    assert_eq!(report.overall, 100);
    assert_eq!(report.title, 100);
    assert_eq!(report.description, 100);
    assert!(report.rules.iter().all(|rule| rule.passed));
}

#[test]
fn test_each_rule_contributes_its_weight() {
    let full = complete_page();

    let mut no_title = full.clone();
    no_title.title.clear();
    assert_eq!(calculate_overall_score(&no_title), 92);

    let mut thin = full.clone();
    thin.total_words = 299;
    assert_eq!(calculate_overall_score(&thin), 92);

    let mut missing_alt = full.clone();
    missing_alt.image_alt_texts.push(None);
    assert_eq!(calculate_overall_score(&missing_alt), 96);

    let mut messy = full.clone();
    messy.links.internal.push(link("/About_Us.html"));
    assert_eq!(calculate_overall_score(&messy), 90);

    let mut no_card = full;
    no_card.twitter.card = None;
    assert_eq!(calculate_overall_score(&no_card), 95);
}

#[test]
fn test_content_and_metadata_outweigh_single_flags() {
    let weight = |name: &str| RULES.iter().find(|r| r.name == name).unwrap().weight;
    assert!(weight("internal_links") >= 2 * weight("open_graph"));
    assert!(weight("url_hygiene") >= 2 * weight("canonical"));
    assert!(weight("robots") > weight("language"));
}

#[test]
fn test_scores_stay_in_range() {
    let mut crowded = complete_page();
    crowded.links.internal = (0..10_000).map(|i| link(&format!("/p{}", i))).collect();
    crowded.links.external = (0..10_000).map(|i| link(&format!("https://x{}.org", i))).collect();
    crowded.total_words = usize::MAX;
    crowded.title = "t".repeat(10_000);

    for facts in [crowded, empty_page(), complete_page(), PageFacts::sentinel()] {
        let report = score(&facts);
        for value in [
            report.overall,
            report.title,
            report.description,
            report.link_structure,
            report.content_depth,
        ] {
            assert!(value <= 100, "{:?}", report);
        }
    }
}

#[test]
fn test_link_structure_tiers() {
    let full = complete_page();
    // 5 internal (15) + 2 external (20) + ratio 5/7 (20) + all clean (30)
    assert_eq!(calculate_link_structure_score(&full), 85);

    let mut many = full.clone();
    many.links.internal = (0..8).map(|i| link(&format!("/p{}", i))).collect();
    // 8 internal (30) + 2 external (20) + ratio 0.8 (20) + all clean (30)
    assert_eq!(calculate_link_structure_score(&many), 100);

    let mut external_heavy = full.clone();
    external_heavy.links.external = (0..5).map(|i| link(&format!("https://x{}.org", i))).collect();
    // 5 internal (15) + 5 external (10) + ratio 0.5 (10) + all clean (30)
    assert_eq!(calculate_link_structure_score(&external_heavy), 65);

    let mut half_clean = full;
    half_clean.links.internal = vec![link("/a"), link("/B"), link("/c_d"), link("/e")];
    // 4 internal (15) + 2 external (20) + ratio 0.67 (10) + 50% clean (15)
    assert_eq!(calculate_link_structure_score(&half_clean), 60);
}

#[test]
fn test_link_structure_without_links_is_zero() {
    let mut facts = complete_page();
    facts.links.internal.clear();
    facts.links.external.clear();
    assert_eq!(calculate_link_structure_score(&facts), 0);
}

#[test]
fn test_content_depth() {
    let mut facts = complete_page();
    // words + h1 + image
    assert_eq!(calculate_content_depth_score(&facts), 60);

    for text in ["A", "B"] {
        facts.headings.push(2, text.to_string());
        facts.headings.push(3, text.to_string());
    }
    assert_eq!(calculate_content_depth_score(&facts), 100);

    facts.total_images = 0;
    facts.total_words = 10;
    assert_eq!(calculate_content_depth_score(&facts), 60);
}

#[test]
fn test_hygiene_checks_report_failing_links() {
    let mut facts = complete_page();
    facts.links.internal = vec![
        link("/Page?x=1+2"),
        link("/page"),
        link("/legacy.php"),
        link(&format!("/{}", "a".repeat(120))),
    ];

    let report = score(&facts);
    let symbols = report.check(CheckId::UrlSymbols).unwrap();
    assert!(!symbols.passed);
    assert_eq!(symbols.failing, vec!["/Page?x=1+2"]);

    let lowercase = report.check(CheckId::LowercaseUrls).unwrap();
    assert_eq!(lowercase.failing, vec!["/Page?x=1+2"]);

    let extensions = report.check(CheckId::UrlExtensions).unwrap();
    assert_eq!(extensions.failing, vec!["/legacy.php"]);

    let short = report.check(CheckId::ShortUrls).unwrap();
    assert_eq!(short.failing.len(), 1);

    for check in [
        CheckId::UrlSymbols,
        CheckId::LowercaseUrls,
        CheckId::UrlExtensions,
        CheckId::ShortUrls,
    ] {
        assert!(!report.check(check).unwrap().failing.contains(&"/page".to_string()));
    }
    assert!(!report.rule("url_hygiene").unwrap().passed);
}

#[test]
fn test_display_checks() {
    let mut facts = complete_page();
    facts.frame_texts = vec![String::new()];
    facts.invalid_internal_links.insert("/blog".to_string());
    facts.headings.push(1, "Second".to_string());

    let report = score(&facts);
    let passed = |id| report.check(id).unwrap().passed;

    assert!(passed(CheckId::TitleDefined));
    assert!(passed(CheckId::TitleLength));
    assert!(passed(CheckId::DescriptionLength));
    assert!(passed(CheckId::HasH1));
    assert!(!passed(CheckId::SingleH1));
    assert!(passed(CheckId::H1Length));
    assert!(!passed(CheckId::NoFrames));
    assert!(!passed(CheckId::NotFoundStatus));
    assert_eq!(
        report.check(CheckId::InternalLinksAlive).unwrap().failing,
        vec!["/blog"]
    );
    assert!(passed(CheckId::OpenGraph));
    assert_eq!(report.checks.len(), 22);
}

#[test]
fn test_title_length_check_bounds() {
    let mut facts = complete_page();
    facts.title = "t".repeat(61);
    assert!(!score(&facts).check(CheckId::TitleLength).unwrap().passed);
    facts.title = "t".repeat(10);
    assert!(score(&facts).check(CheckId::TitleLength).unwrap().passed);
}

#[test]
fn test_scoring_is_idempotent() {
    let facts = complete_page();
    assert_eq!(score(&facts), score(&facts));
    let engine = ScoringEngine::default();
    assert_eq!(engine.score(&facts), score(&facts));
}

#[test]
fn test_map_range() {
    assert_eq!(map_range(55.0, 0.0, 50.0, 0.0, 100.0), 100);
    assert_eq!(map_range(25.0, 0.0, 50.0, 0.0, 100.0), 50);
    assert_eq!(map_range(1.0, 0.0, 150.0, 0.0, 100.0), 1);
    assert_eq!(map_range(-5.0, 0.0, 50.0, 0.0, 100.0), 0);
    assert_eq!(map_range(f64::NAN, 0.0, 50.0, 0.0, 100.0), 0);
    assert_eq!(map_range(3.0, 5.0, 5.0, 0.0, 100.0), 100);
}
