//! Document processing pipeline: extract, chunk, embed, record.

use chrono::Utc;
use tracing::info;

use crate::document::chunker::{chunk_text, ChunkConfig};
use crate::document::{extract_text, ExtractionError, TextExtractor};
use crate::embedding::{embed_chunks, Embedder};
use crate::record::{DocumentMetadata, ProcessedDocument};

/// Options for one document-processing run.
#[derive(Debug, Clone)]
pub struct ProcessOptions {
    pub chunk_size: usize,
    pub overlap: usize,
    pub break_window: usize,
    pub model: String,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        let chunking = ChunkConfig::default();
        Self {
            chunk_size: chunking.chunk_size,
            overlap: chunking.overlap,
            break_window: chunking.break_window,
            model: "llama3.2".to_string(),
        }
    }
}

impl ProcessOptions {
    fn chunk_config(&self) -> ChunkConfig {
        ChunkConfig {
            chunk_size: self.chunk_size,
            overlap: self.overlap,
            break_window: self.break_window,
        }
    }
}

/// Run the full pipeline over one document.
///
/// Extraction failure is fatal for the document; embedding failures are
/// recorded per chunk and never abort the run.
pub async fn process_document(
    extractor: &dyn TextExtractor,
    embedder: &dyn Embedder,
    bytes: &[u8],
    file_name: &str,
    options: &ProcessOptions,
) -> Result<ProcessedDocument, ExtractionError> {
    let extracted = extract_text(extractor, bytes, file_name)?;
    info!(
        "extracted {} chars from '{}' ({} pages)",
        extracted.text.len(),
        file_name,
        extracted.num_pages
    );

    let chunks = chunk_text(&extracted.text, &options.chunk_config());
    info!("created {} chunks", chunks.len());

    let embedded = embed_chunks(embedder, &chunks).await;

    Ok(ProcessedDocument {
        metadata: DocumentMetadata {
            file_name: file_name.to_string(),
            total_pages: extracted.num_pages,
            processed_at: Utc::now(),
            model: options.model.clone(),
            chunk_size: options.chunk_size,
            chunk_overlap: options.overlap,
        },
        chunks: embedded,
    })
}
