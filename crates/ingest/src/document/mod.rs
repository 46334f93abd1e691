pub mod chunker;
mod pdf;
mod txt;

use thiserror::Error;

pub use pdf::{FallbackExtractor, PdfExtractor, PdftotextExtractor};
pub use txt::extract_txt;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Unsupported file type: {0}")]
    UnsupportedType(String),
    #[error("PDF extraction failed: {0}")]
    PdfError(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Page-ordered text extracted from a document.
#[derive(Debug, Clone)]
pub struct ExtractedText {
    /// Raw text, page-ordered. Whitespace is normalized later, by the chunker.
    pub text: String,
    /// Number of pages the text was drawn from (1 for plain text).
    pub num_pages: usize,
}

/// An extraction backend: raw document bytes in, page-ordered text out.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError>;
}

/// Extract text from file bytes based on file extension.
pub fn extract_text(
    extractor: &dyn TextExtractor,
    bytes: &[u8],
    filename: &str,
) -> Result<ExtractedText, ExtractionError> {
    let ext = filename.rsplit('.').next().unwrap_or("").to_lowercase();

    match ext.as_str() {
        "pdf" => extractor.extract(bytes),
        "txt" | "text" => txt::extract_txt(bytes),
        other => Err(ExtractionError::UnsupportedType(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubExtractor;

    impl TextExtractor for StubExtractor {
        fn extract(&self, _bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
            Ok(ExtractedText {
                text: "from pdf".to_string(),
                num_pages: 3,
            })
        }
    }

    #[test]
    fn dispatches_pdf_to_extractor() {
        let doc = extract_text(&StubExtractor, b"%PDF-", "report.pdf").unwrap();
        assert_eq!(doc.text, "from pdf");
        assert_eq!(doc.num_pages, 3);
    }

    #[test]
    fn dispatches_txt_without_extractor() {
        let doc = extract_text(&StubExtractor, b"plain contents", "notes.txt").unwrap();
        assert_eq!(doc.text, "plain contents");
        assert_eq!(doc.num_pages, 1);
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = extract_text(&StubExtractor, b"GIF89a", "image.gif").unwrap_err();
        assert!(matches!(err, ExtractionError::UnsupportedType(ref t) if t == "gif"));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let doc = extract_text(&StubExtractor, b"%PDF-", "REPORT.PDF").unwrap();
        assert_eq!(doc.num_pages, 3);
    }
}
