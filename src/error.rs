use std::time::Duration;
use thiserror::Error;

/// Errors that stop an extraction before any facts are produced
#[derive(Error, Debug)]
pub enum ExtractionError {
    #[error("No accessible target page: {0}")]
    NoAccessibleTarget(String),
}

impl From<fantoccini::error::NewSessionError> for ExtractionError {
    fn from(err: fantoccini::error::NewSessionError) -> Self {
        ExtractionError::NoAccessibleTarget(format!("WebDriver session refused: {}", err))
    }
}

impl From<fantoccini::error::CmdError> for ExtractionError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        ExtractionError::NoAccessibleTarget(format!("WebDriver command failed: {}", err))
    }
}

impl From<url::ParseError> for ExtractionError {
    fn from(err: url::ParseError) -> Self {
        ExtractionError::NoAccessibleTarget(format!("Invalid page URL: {}", err))
    }
}

/// Errors from a single auxiliary network check
#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("Request failed: {0}")]
    Request(String),

    #[error("Timed out after {0:?}")]
    Timeout(Duration),

    #[error("Check task failed: {0}")]
    Join(String),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::Request(err.to_string())
    }
}
