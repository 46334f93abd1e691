use std::path::Path;
use std::process::Command;

use super::{ExtractedText, ExtractionError, TextExtractor};

/// Extractor backed by the pure-Rust `pdf-extract` crate.
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let text = pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractionError::PdfError(e.to_string()))?;

        // pdf-extract returns all text as one string.
        // Form feed characters (\x0C) separate pages.
        let num_pages = text.matches('\x0C').count() + 1;

        Ok(ExtractedText { text, num_pages })
    }
}

/// Fallback extractor shelling out to poppler's `pdftotext`.
///
/// Both extractors receive the same bytes; this one round-trips them
/// through a temp file because pdftotext only reads from disk.
pub struct PdftotextExtractor;

impl PdftotextExtractor {
    /// Page count via `pdfinfo`, defaulting to 1 when unavailable.
    fn page_count(pdf_path: &Path) -> usize {
        let Ok(output) = Command::new("pdfinfo").arg(pdf_path).output() else {
            return 1;
        };
        if !output.status.success() {
            return 1;
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .find_map(|line| line.strip_prefix("Pages:"))
            .and_then(|rest| rest.trim().parse().ok())
            .unwrap_or(1)
    }
}

impl TextExtractor for PdftotextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        let temp_dir = std::env::temp_dir();
        let stem = uuid::Uuid::new_v4();
        let pdf_path = temp_dir.join(format!("vellum-{stem}.pdf"));
        let txt_path = temp_dir.join(format!("vellum-{stem}.txt"));

        std::fs::write(&pdf_path, bytes)?;

        let result = Command::new("pdftotext")
            .arg("-layout")
            .arg(&pdf_path)
            .arg(&txt_path)
            .output();

        let outcome = match result {
            Ok(output) if output.status.success() => {
                let num_pages = Self::page_count(&pdf_path);
                std::fs::read_to_string(&txt_path)
                    .map(|text| ExtractedText { text, num_pages })
                    .map_err(ExtractionError::Io)
            }
            Ok(output) => Err(ExtractionError::PdfError(format!(
                "pdftotext failed: {}",
                String::from_utf8_lossy(&output.stderr)
            ))),
            Err(e) => Err(ExtractionError::PdfError(format!(
                "pdftotext not available: {e}"
            ))),
        };

        let _ = std::fs::remove_file(&pdf_path);
        let _ = std::fs::remove_file(&txt_path);

        outcome
    }
}

/// Tries a primary extractor, handing the same bytes to a fallback when it
/// fails. Fails only when every backend fails.
pub struct FallbackExtractor {
    primary: Box<dyn TextExtractor>,
    fallback: Box<dyn TextExtractor>,
}

impl FallbackExtractor {
    pub fn new(
        primary: impl TextExtractor + 'static,
        fallback: impl TextExtractor + 'static,
    ) -> Self {
        Self {
            primary: Box::new(primary),
            fallback: Box::new(fallback),
        }
    }

    /// The default chain: `pdf-extract` first, then poppler's `pdftotext`.
    pub fn default_chain() -> Self {
        Self::new(PdfExtractor, PdftotextExtractor)
    }
}

impl TextExtractor for FallbackExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<ExtractedText, ExtractionError> {
        match self.primary.extract(bytes) {
            Ok(doc) => Ok(doc),
            Err(primary_err) => {
                tracing::warn!("primary PDF extraction failed, trying fallback: {primary_err}");
                self.fallback.extract(bytes).map_err(|fallback_err| {
                    ExtractionError::PdfError(format!("{primary_err}; fallback: {fallback_err}"))
                })
            }
        }
    }
}
