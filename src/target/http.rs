use crate::error::ExtractionError;
use crate::parsers::DocumentType;
use crate::target::{DocumentSnapshot, TargetPage};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

/// A page loaded with a plain HTTP GET, without running scripts
#[derive(Debug, Clone)]
pub struct HttpPage {
    client: Client,
    url: String,
}

impl HttpPage {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl TargetPage for HttpPage {
    async fn snapshot(&self) -> Result<DocumentSnapshot, ExtractionError> {
        ::log::debug!("GET page source: {}", self.url);

        let response = self.client.get(&self.url).send().await.map_err(|e| {
            ExtractionError::NoAccessibleTarget(format!("Failed to load {}: {}", self.url, e))
        })?;

        let url = response.url().clone();
        let document_type = DocumentType::from_content_type(
            response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
        );

        let html = response.text().await.map_err(|e| {
            ExtractionError::NoAccessibleTarget(format!("Failed to read body of {}: {}", url, e))
        })?;

        ::log::info!("Loaded {} ({} bytes)", url, html.len());

        Ok(DocumentSnapshot {
            url,
            html,
            document_type,
        })
    }
}
