//! vellum — process PDF documents into chunk + embedding records.
//!
//! Extracts text from each input, splits it into overlapping chunks,
//! requests an embedding per chunk from a local Ollama instance, and
//! writes one JSON record per document.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use vellum_ingest::config;
use vellum_ingest::document::FallbackExtractor;
use vellum_ingest::embedding::OllamaEmbedder;
use vellum_ingest::pipeline::{process_document, ProcessOptions};

// ── CLI ─────────────────────────────────────────────────────────────

/// Process PDF documents and generate embeddings using a local Ollama model.
#[derive(Parser, Debug)]
#[command(name = "vellum", version, about)]
struct Cli {
    /// Path(s) to the PDF file(s) to process.
    #[arg(short, long, required = true, num_args = 1..)]
    input: Vec<PathBuf>,

    /// Path for the output JSON file (defaults to the input path with a
    /// .json extension; only valid with a single input).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Size of text chunks in characters.
    #[arg(short, long, env = "VELLUM_CHUNK_SIZE", default_value_t = 1000)]
    chunk_size: usize,

    /// Overlap between chunks in characters.
    #[arg(long, env = "VELLUM_CHUNK_OVERLAP", default_value_t = 200)]
    overlap: usize,

    /// Embedding model name.
    #[arg(long, env = "OLLAMA_EMBEDDING_MODEL", default_value = "llama3.2")]
    model: String,

    /// Base URL of the Ollama instance.
    #[arg(long, env = "OLLAMA_URL", default_value = "http://localhost:11434")]
    ollama_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    config::load_dotenv();
    let cli = Cli::parse();

    if cli.output.is_some() && cli.input.len() > 1 {
        anyhow::bail!("--output is only valid with a single --input file");
    }

    let extractor = FallbackExtractor::default_chain();
    let embedder = OllamaEmbedder::new(cli.ollama_url.clone(), cli.model.clone());
    let options = ProcessOptions {
        chunk_size: cli.chunk_size,
        overlap: cli.overlap,
        model: cli.model.clone(),
        ..Default::default()
    };

    let mut failures = 0usize;
    for input in &cli.input {
        info!("processing {}", input.display());

        let bytes = std::fs::read(input)
            .with_context(|| format!("reading {}", input.display()))?;
        let file_name = input
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("document.pdf");

        match process_document(&extractor, &embedder, &bytes, file_name, &options).await {
            Ok(record) => {
                let output = cli
                    .output
                    .clone()
                    .unwrap_or_else(|| input.with_extension("json"));
                record
                    .write_json(&output)
                    .await
                    .with_context(|| format!("writing {}", output.display()))?;
                info!(
                    "{}: {} chunks ({} embedding failures), saved to {}",
                    file_name,
                    record.chunks.len(),
                    record.failed_chunks(),
                    output.display()
                );
            }
            Err(e) => {
                error!("{file_name}: {e}");
                failures += 1;
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} document(s) failed");
    }

    Ok(())
}
