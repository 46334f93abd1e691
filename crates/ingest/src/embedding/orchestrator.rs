//! Sequential embedding of chunk batches with per-chunk failure recovery.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::document::chunker::TextChunk;

use super::traits::Embedder;

/// A chunk decorated with the result of its embedding request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddedChunk {
    pub text: String,
    pub index: usize,
    pub start: usize,
    pub end: usize,
    /// The vector, or `None` when the request failed (serialized as null).
    pub embedding: Option<Vec<f32>>,
    /// Failure message for this chunk; omitted on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Embed chunks one at a time, in index order.
///
/// One request per chunk, one attempt each, one in flight at a time — the
/// local inference endpoint is the bottleneck, not this loop. A failed
/// request is recorded on its chunk and never aborts the batch; the output
/// always has one entry per input chunk, in input order.
pub async fn embed_chunks(embedder: &dyn Embedder, chunks: &[TextChunk]) -> Vec<EmbeddedChunk> {
    let mut embedded = Vec::with_capacity(chunks.len());

    for chunk in chunks {
        debug!("embedding chunk {}/{}", chunk.index + 1, chunks.len());

        let (embedding, error) = match embedder.embed(&chunk.text).await {
            Ok(vector) => (Some(vector), None),
            Err(e) => {
                warn!("embedding failed for chunk {}: {e}", chunk.index);
                (None, Some(e.to_string()))
            }
        };

        embedded.push(EmbeddedChunk {
            text: chunk.text.clone(),
            index: chunk.index,
            start: chunk.start,
            end: chunk.end,
            embedding,
            error,
        });
    }

    embedded
}
