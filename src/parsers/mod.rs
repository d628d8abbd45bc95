pub mod html;
pub mod text;

#[cfg(test)]
mod tests;

pub use html::DomSignals;
pub use text::BodyText;

/// Kind of document a target returned
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentType {
    Html,
    /// Anything without HTML structure; parsed as an empty page
    Other,
}

impl DocumentType {
    /// Classify by `Content-Type` header value; a missing header means HTML
    pub fn from_content_type(content_type: Option<&str>) -> Self {
        match content_type {
            None => DocumentType::Html,
            Some(value) => {
                let mime = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
                if mime.is_empty() || mime == "text/html" || mime == "application/xhtml+xml" {
                    DocumentType::Html
                } else {
                    ::log::debug!("Classifying {} as non-HTML", mime);
                    DocumentType::Other
                }
            }
        }
    }
}

/// Main parser that reads signals from a document of a given type
pub struct Parser;

impl Parser {
    pub fn parse(content: &str, document_type: DocumentType) -> DomSignals {
        match document_type {
            DocumentType::Html => html::parse(content),
            DocumentType::Other => DomSignals::default(),
        }
    }
}
