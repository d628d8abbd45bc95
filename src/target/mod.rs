pub mod http;
pub mod webdriver;

use crate::error::ExtractionError;
use crate::parsers::DocumentType;
use async_trait::async_trait;
use url::Url;

pub use http::HttpPage;
pub use webdriver::WebDriverPage;

/// The document of a target page as read at one point in time
#[derive(Debug, Clone)]
pub struct DocumentSnapshot {
    /// Final document URL, after any redirects
    pub url: Url,
    pub html: String,
    pub document_type: DocumentType,
}

/// A page the extractor can read.
///
/// Implementations fail with [`ExtractionError::NoAccessibleTarget`] when the
/// page cannot be reached at all.
#[async_trait]
pub trait TargetPage: Send + Sync {
    async fn snapshot(&self) -> Result<DocumentSnapshot, ExtractionError>;
}

/// An in-memory document, used when the HTML is already at hand
#[derive(Debug, Clone)]
pub struct StaticPage {
    url: String,
    html: String,
}

impl StaticPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            html: html.into(),
        }
    }
}

#[async_trait]
impl TargetPage for StaticPage {
    async fn snapshot(&self) -> Result<DocumentSnapshot, ExtractionError> {
        Ok(DocumentSnapshot {
            url: Url::parse(&self.url)?,
            html: self.html.clone(),
            document_type: DocumentType::Html,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_page_snapshot() {
        let page = StaticPage::new("https://example.com/a", "<title>A</title>");
        let snapshot = page.snapshot().await.unwrap();
        assert_eq!(snapshot.url.as_str(), "https://example.com/a");
        assert_eq!(snapshot.document_type, DocumentType::Html);
    }

    #[tokio::test]
    async fn test_unparsable_url_is_inaccessible() {
        let page = StaticPage::new("not a url", "");
        let err = page.snapshot().await.unwrap_err();
        assert!(matches!(err, ExtractionError::NoAccessibleTarget(_)));
    }
}
