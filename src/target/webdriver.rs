use crate::error::ExtractionError;
use crate::parsers::DocumentType;
use crate::target::{DocumentSnapshot, TargetPage};
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::timeout;

/// Upper bound on navigating and reading the page source
const NAVIGATION_TIMEOUT: Duration = Duration::from_secs(45);

/// A page rendered by a browser behind a WebDriver server.
///
/// Reads the DOM after scripts have run, which is what a visitor sees.
#[derive(Debug, Clone)]
pub struct WebDriverPage {
    webdriver_url: String,
    url: String,
}

impl WebDriverPage {
    pub fn new(webdriver_url: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            webdriver_url: webdriver_url.into(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl TargetPage for WebDriverPage {
    async fn snapshot(&self) -> Result<DocumentSnapshot, ExtractionError> {
        let client = connect_to_webdriver(&self.webdriver_url).await?;

        let result = match timeout(NAVIGATION_TIMEOUT, read_page(&client, &self.url)).await {
            Ok(result) => result,
            Err(_) => Err(ExtractionError::NoAccessibleTarget(format!(
                "Timed out loading {}",
                self.url
            ))),
        };

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        result
    }
}

async fn read_page(client: &Client, url: &str) -> Result<DocumentSnapshot, ExtractionError> {
    client.goto(url).await?;
    let current = client.current_url().await?;
    let html = client.source().await?;

    ::log::info!("Read rendered source of {} ({} bytes)", current, html.len());

    Ok(DocumentSnapshot {
        url: current,
        html,
        document_type: DocumentType::Html,
    })
}

/// Connects to the WebDriver instance, trying common local ports as fallbacks
async fn connect_to_webdriver(webdriver_url: &str) -> Result<Client, ExtractionError> {
    let first_error = match ClientBuilder::native().connect(webdriver_url).await {
        Ok(client) => {
            ::log::debug!("Connected to WebDriver at {}", webdriver_url);
            return Ok(client);
        }
        Err(e) => {
            ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            e
        }
    };

    let fallback_urls = [
        "http://localhost:9515", // ChromeDriver default
        "http://localhost:4444", // Selenium / geckodriver default
        "http://127.0.0.1:4444", // Try with IP instead of localhost
    ];

    for url in fallback_urls.iter() {
        if *url == webdriver_url {
            continue;
        }

        ::log::info!("Trying fallback WebDriver URL: {}", url);
        if let Ok(client) = ClientBuilder::native().connect(url).await {
            ::log::debug!("Connected to fallback WebDriver at {}", url);
            return Ok(client);
        }
    }

    ::log::error!(
        "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
    );
    Err(first_error.into())
}
