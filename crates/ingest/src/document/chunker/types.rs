//! Chunker configuration and output types.

use serde::{Deserialize, Serialize};

// ── Configuration ───────────────────────────────────────────────────────────

/// Configuration for the chunking engine.
#[derive(Debug, Clone)]
pub struct ChunkConfig {
    /// Target maximum chunk length, in bytes of normalized text (default: 1000).
    pub chunk_size: usize,
    /// How much of one chunk's tail reappears at the next chunk's head
    /// (default: 200). Values >= `chunk_size` are tolerated; the engine
    /// still makes strict forward progress.
    pub overlap: usize,
    /// How far back from the target cut the break-point search may reach
    /// (default: 100).
    pub break_window: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
            break_window: 100,
        }
    }
}

impl ChunkConfig {
    /// Config with the given size and overlap, keeping the default window.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        Self {
            chunk_size,
            overlap,
            ..Default::default()
        }
    }
}

// ── Chunk output ────────────────────────────────────────────────────────────

/// A contiguous span of normalized text.
///
/// `start` and `end` are byte offsets into the normalized source string.
/// `end` is the pre-trim slice end, so adjacent spans carry the configured
/// overlap even when trailing whitespace was trimmed from `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextChunk {
    /// Trimmed chunk content; never empty.
    pub text: String,
    /// 0-based position in the emitted sequence, contiguous.
    pub index: usize,
    /// Offset where the span begins (inclusive).
    pub start: usize,
    /// Offset where the span was sliced (exclusive, pre-trim).
    pub end: usize,
}
