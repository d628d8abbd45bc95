use crate::config::{AnalyzerConfig, CanonicalPolicy};
use crate::error::ExtractionError;
use crate::filter::{self, resolve_internal};
use crate::parsers::{DomSignals, Parser};
use crate::probe::{self, CheckPlan, CheckResults, StatusProbe};
use crate::results::PageFacts;
use crate::target::TargetPage;
use std::sync::Arc;
use url::Url;

/// Reads one complete [`PageFacts`] record from a target page.
///
/// The DOM is read first, then the page status, the 404 check and every
/// internal link are probed concurrently. Network failures only downgrade
/// their own fact; only an unreachable target fails the whole extraction.
pub async fn extract(
    target: &dyn TargetPage,
    probe: Arc<dyn StatusProbe>,
    config: &AnalyzerConfig,
) -> Result<PageFacts, ExtractionError> {
    let snapshot = target.snapshot().await?;
    ::log::info!("Extracting signals from {}", snapshot.url);

    let signals = Parser::parse(&snapshot.html, snapshot.document_type);

    let (plan, unresolved) = check_plan(&snapshot.url, &signals, config);
    let mut checks = probe::run_checks(
        probe,
        plan,
        config.effective_concurrency(),
        config.check_timeout(),
    )
    .await;
    // Links that cannot be fetched at all count as broken
    checks.invalid_internal_links.extend(unresolved);

    Ok(assemble(snapshot.url, signals, checks, config.canonical_policy))
}

/// Plan the network checks. Also returns the internal hrefs that cannot be
/// resolved to an http(s) URL.
fn check_plan(
    page_url: &Url,
    signals: &DomSignals,
    config: &AnalyzerConfig,
) -> (CheckPlan, Vec<String>) {
    let mut internal_links = Vec::new();
    let mut unresolved = Vec::new();
    for link in &signals.links.internal {
        match resolve_internal(page_url, &link.href) {
            Some(url) => internal_links.push((link.href.clone(), url)),
            None => {
                ::log::warn!("Cannot resolve internal link {}", link.href);
                unresolved.push(link.href.clone());
            }
        }
    }

    let plan = CheckPlan {
        page: page_url.clone(),
        not_found: filter::not_found_probe_url(page_url, &config.not_found_path),
        internal_links,
    };
    (plan, unresolved)
}

/// Combine DOM signals and check results into the final record
pub fn assemble(
    page_url: Url,
    signals: DomSignals,
    checks: CheckResults,
    policy: CanonicalPolicy,
) -> PageFacts {
    let canonical = signals
        .canonical_href
        .as_deref()
        .filter(|href| !href.is_empty())
        .and_then(|href| page_url.join(href).ok());

    let indexable = is_indexable(
        &page_url,
        checks.http_status,
        signals.robots.as_deref(),
        canonical.as_ref(),
        policy,
    );

    let mut invalid_internal_links = checks.invalid_internal_links;
    // Only hrefs that are actually internal links may be reported
    invalid_internal_links.retain(|href| signals.links.internal.iter().any(|l| &l.href == href));

    PageFacts {
        url: page_url.to_string(),
        http_status: checks.http_status,
        title: signals.title,
        description: signals.description,
        open_graph: signals.open_graph,
        twitter: signals.twitter,
        robots: signals.robots,
        canonical_url: canonical.map(|url| url.to_string()),
        language: signals.language,
        keywords: signals.keywords,
        headings: signals.headings,
        links: signals.links,
        invalid_internal_links,
        broken_url_check_passed: checks.broken_url_check_passed,
        indexable,
        total_images: signals.image_alt_texts.len(),
        image_alt_texts: signals.image_alt_texts,
        frame_texts: signals.frame_texts,
        total_words: signals.body.words,
        total_characters: signals.body.characters,
    }
}

/// A page is indexable when it answers 200, carries no `noindex` directive
/// and declares itself canonical.
pub fn is_indexable(
    page_url: &Url,
    http_status: u16,
    robots: Option<&str>,
    canonical: Option<&Url>,
    policy: CanonicalPolicy,
) -> bool {
    let status_ok = http_status == 200;
    let no_noindex = !robots.is_some_and(|content| content.to_ascii_lowercase().contains("noindex"));
    let canonical_ok = match canonical {
        Some(canonical) => same_document(canonical, page_url),
        None => policy == CanonicalPolicy::AbsentPasses,
    };
    status_ok && no_noindex && canonical_ok
}

fn same_document(a: &Url, b: &Url) -> bool {
    let mut a = a.clone();
    let mut b = b.clone();
    a.set_fragment(None);
    b.set_fragment(None);
    a == b
}
