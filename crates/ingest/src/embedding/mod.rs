pub mod ollama;
pub mod orchestrator;
pub mod traits;

pub use ollama::OllamaEmbedder;
pub use orchestrator::{embed_chunks, EmbeddedChunk};
pub use traits::{Embedder, EmbeddingError};
