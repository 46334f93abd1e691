pub mod config;
pub mod document;
pub mod embedding;
pub mod pipeline;
pub mod record;

pub use config::Config;
pub use pipeline::{process_document, ProcessOptions};
pub use record::{DocumentMetadata, ProcessedDocument};
