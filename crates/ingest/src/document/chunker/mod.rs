//! Overlapping text chunking engine.
//!
//! Splits normalized document text into character-budget spans with
//! configurable overlap, seeking paragraph, sentence, and word boundaries
//! near each cut so chunks end on semantic units where possible.

mod engine;
mod normalize;
mod types;

pub use engine::{chunk_text, chunk_text_simple};
pub use normalize::{flatten, normalize};
pub use types::{ChunkConfig, TextChunk};
