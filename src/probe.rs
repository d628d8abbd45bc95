use crate::error::ProbeError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::timeout;
use url::Url;

/// Answers the HTTP status of a URL
#[async_trait]
pub trait StatusProbe: Send + Sync {
    async fn status(&self, url: &Url) -> Result<u16, ProbeError>;
}

/// Status probe backed by a reqwest client
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusProbe for HttpProbe {
    async fn status(&self, url: &Url) -> Result<u16, ProbeError> {
        let response = self.client.get(url.clone()).send().await?;
        Ok(response.status().as_u16())
    }
}

/// Build the HTTP client shared by page loading and probes
pub fn build_client(user_agent: &str, request_timeout: Duration) -> Result<Client, ProbeError> {
    Ok(Client::builder()
        .user_agent(user_agent)
        .timeout(request_timeout)
        .build()?)
}

/// What to check for one page
#[derive(Debug, Clone)]
pub struct CheckPlan {
    /// The page itself, re-fetched for its status
    pub page: Url,
    /// Same-origin path expected to answer 404
    pub not_found: Option<Url>,
    /// Internal hrefs and the URL each resolves to
    pub internal_links: Vec<(String, Url)>,
}

/// Outcome of every auxiliary check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckResults {
    /// Status of the page, 0 when the check failed
    pub http_status: u16,
    pub broken_url_check_passed: bool,
    pub invalid_internal_links: BTreeSet<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum CheckKind {
    Page,
    NotFound,
    Link(usize),
}

/// Run all checks of a plan concurrently, at most `max_concurrency` at a time.
///
/// Every check is bounded by `check_timeout`. A failed or timed-out check
/// only downgrades its own result.
pub async fn run_checks(
    probe: Arc<dyn StatusProbe>,
    plan: CheckPlan,
    max_concurrency: usize,
    check_timeout: Duration,
) -> CheckResults {
    let semaphore = Arc::new(Semaphore::new(max_concurrency.max(1)));
    let mut tasks = JoinSet::new();

    // Duplicate hrefs share one request
    let mut distinct: BTreeMap<Url, Vec<String>> = BTreeMap::new();
    for (href, url) in plan.internal_links {
        let hrefs = distinct.entry(url).or_default();
        if !hrefs.contains(&href) {
            hrefs.push(href);
        }
    }
    let link_targets: Vec<(Url, Vec<String>)> = distinct.into_iter().collect();

    let mut jobs = vec![(CheckKind::Page, plan.page)];
    if let Some(url) = plan.not_found {
        jobs.push((CheckKind::NotFound, url));
    }
    jobs.extend(
        link_targets
            .iter()
            .enumerate()
            .map(|(i, (url, _))| (CheckKind::Link(i), url.clone())),
    );

    ::log::info!("Running {} network checks", jobs.len());

    for (kind, url) in jobs {
        let probe = Arc::clone(&probe);
        let semaphore = Arc::clone(&semaphore);
        tasks.spawn(async move {
            let result = match semaphore.acquire_owned().await {
                Ok(_permit) => checked_status(probe.as_ref(), &url, check_timeout).await,
                Err(e) => Err(ProbeError::Join(e.to_string())),
            };
            (kind, url, result)
        });
    }

    let mut results = CheckResults::default();
    let mut reported = BTreeSet::new();

    while let Some(joined) = tasks.join_next().await {
        let (kind, url, status) = match joined {
            Ok(outcome) => outcome,
            Err(e) => {
                ::log::error!("Network check task failed: {}", e);
                continue;
            }
        };
        reported.insert(kind);

        match (kind, status) {
            (CheckKind::Page, Ok(status)) => results.http_status = status,
            (CheckKind::NotFound, Ok(status)) => results.broken_url_check_passed = status == 404,
            (CheckKind::Link(_), Ok(status)) if (200..300).contains(&status) => {
                ::log::trace!("Link alive ({}): {}", status, url);
            }
            (CheckKind::Link(i), Ok(status)) => {
                ::log::debug!("Link answered {}: {}", status, url);
                results.invalid_internal_links.extend(link_targets[i].1.iter().cloned());
            }
            (CheckKind::Link(i), Err(e)) => {
                ::log::debug!("Link check failed for {}: {}", url, e);
                results.invalid_internal_links.extend(link_targets[i].1.iter().cloned());
            }
            (_, Err(e)) => ::log::warn!("Check of {} failed: {}", url, e),
        }
    }

    // A link whose task never reported back counts as invalid
    for (i, (_, hrefs)) in link_targets.iter().enumerate() {
        if !reported.contains(&CheckKind::Link(i)) {
            results.invalid_internal_links.extend(hrefs.iter().cloned());
        }
    }

    ::log::info!(
        "Checks complete: status {}, 404 check {}, {} invalid internal links",
        results.http_status,
        if results.broken_url_check_passed { "passed" } else { "failed" },
        results.invalid_internal_links.len()
    );

    results
}

async fn checked_status(
    probe: &dyn StatusProbe,
    url: &Url,
    check_timeout: Duration,
) -> Result<u16, ProbeError> {
    match timeout(check_timeout, probe.status(url)).await {
        Ok(result) => result,
        Err(_) => Err(ProbeError::Timeout(check_timeout)),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::filter::resolve_internal;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Probe answering from a fixed table; unknown URLs fail
    #[derive(Default)]
    pub(crate) struct TableProbe {
        pub statuses: HashMap<String, u16>,
        pub hanging: Vec<String>,
        pub in_flight: AtomicUsize,
        pub max_in_flight: AtomicUsize,
        pub calls: AtomicUsize,
    }

    impl TableProbe {
        pub(crate) fn with(statuses: &[(&str, u16)]) -> Self {
            Self {
                statuses: statuses.iter().map(|(u, s)| (u.to_string(), *s)).collect(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl StatusProbe for TableProbe {
        async fn status(&self, url: &Url) -> Result<u16, ProbeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(5)).await;
            if self.hanging.iter().any(|h| h == url.as_str()) {
                tokio::time::sleep(Duration::from_secs(3600)).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            self.statuses
                .get(url.as_str())
                .copied()
                .ok_or_else(|| ProbeError::Request(format!("connection refused: {}", url)))
        }
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    fn plan(links: &[&str]) -> CheckPlan {
        CheckPlan {
            page: url("https://example.com/"),
            not_found: Some(url("https://example.com/page-not-found-seo-check")),
            internal_links: links
                .iter()
                .map(|href| {
                    let page = url("https://example.com/");
                    (href.to_string(), resolve_internal(&page, href).unwrap())
                })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_one_dead_link_of_three() {
        let probe = Arc::new(TableProbe::with(&[
            ("https://example.com/", 200),
            ("https://example.com/page-not-found-seo-check", 404),
            ("https://example.com/a", 200),
            ("https://example.com/b", 404),
            ("https://example.com/c", 204),
        ]));
        let results = run_checks(probe, plan(&["/a", "/b", "/c"]), 4, Duration::from_secs(5)).await;

        assert_eq!(results.http_status, 200);
        assert!(results.broken_url_check_passed);
        assert_eq!(results.invalid_internal_links.len(), 1);
        assert!(results.invalid_internal_links.contains("/b"));
    }

    #[tokio::test]
    async fn test_errors_downgrade_individual_results() {
        let probe = Arc::new(TableProbe::with(&[
            ("https://example.com/page-not-found-seo-check", 200),
            ("https://example.com/a", 200),
        ]));
        let results = run_checks(probe, plan(&["/a", "/gone"]), 2, Duration::from_secs(5)).await;

        assert_eq!(results.http_status, 0);
        assert!(!results.broken_url_check_passed);
        assert_eq!(
            results.invalid_internal_links.into_iter().collect::<Vec<_>>(),
            vec!["/gone"]
        );
    }

    #[tokio::test]
    async fn test_duplicate_links_share_a_request() {
        let probe = Arc::new(TableProbe::with(&[("https://example.com/x", 500)]));
        let results = run_checks(
            probe.clone(),
            plan(&["/x", "/x#top", "/x"]),
            2,
            Duration::from_secs(5),
        )
        .await;

        // page + 404 check + one link request
        assert_eq!(probe.calls.load(Ordering::SeqCst), 3);
        assert_eq!(
            results.invalid_internal_links.into_iter().collect::<Vec<_>>(),
            vec!["/x", "/x#top"]
        );
    }

    #[tokio::test]
    async fn test_concurrency_is_bounded() {
        let links: Vec<String> = (0..20).map(|i| format!("/p{}", i)).collect();
        let refs: Vec<&str> = links.iter().map(String::as_str).collect();
        let probe = Arc::new(TableProbe::default());
        run_checks(probe.clone(), plan(&refs), 3, Duration::from_secs(5)).await;

        assert!(probe.max_in_flight.load(Ordering::SeqCst) <= 3);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 22);
    }

    #[tokio::test]
    async fn test_hanging_link_times_out_without_blocking_others() {
        let mut probe = TableProbe::with(&[
            ("https://example.com/", 200),
            ("https://example.com/fast", 200),
        ]);
        probe.hanging.push("https://example.com/slow".to_string());
        let results = run_checks(
            Arc::new(probe),
            plan(&["/slow", "/fast"]),
            4,
            Duration::from_millis(200),
        )
        .await;

        assert_eq!(results.http_status, 200);
        assert_eq!(
            results.invalid_internal_links.into_iter().collect::<Vec<_>>(),
            vec!["/slow"]
        );
    }
}
