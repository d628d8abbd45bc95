use crate::parsers::{DocumentType, Parser};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_document_type() {
        let html_content =
            "<html><body><h1>Hello</h1><p>Hello, world!</p><a href=\"/docs\">Docs</a></body></html>";
        let result = Parser::parse(html_content, DocumentType::Html);
        assert_eq!(result.body.text, "Hello Hello, world! Docs");
        assert_eq!(result.links.internal.len(), 1);
        assert_eq!(result.headings.count(1), 1);

        let result = Parser::parse(html_content, DocumentType::Other);
        assert_eq!(result.body.words, 0);
        assert!(result.links.internal.is_empty());
    }

    #[test]
    fn test_content_types() {
        let types = [
            (None, DocumentType::Html),
            (Some("text/html"), DocumentType::Html),
            (Some("text/html; charset=utf-8"), DocumentType::Html),
            (Some("TEXT/HTML"), DocumentType::Html),
            (Some("application/xhtml+xml"), DocumentType::Html),
            (Some("application/pdf"), DocumentType::Other),
            (Some("image/png"), DocumentType::Other),
        ];

        for (content_type, expected) in types {
            assert_eq!(
                DocumentType::from_content_type(content_type),
                expected,
                "Content type {:?} should be parsed as {:?}",
                content_type,
                expected
            );
        }
    }
}
