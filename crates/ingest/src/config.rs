use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_usize(key: &str, default: usize) -> usize {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub ollama: OllamaConfig,
    pub chunking: ChunkingConfig,
}

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        Self {
            server: ServerConfig::from_env(),
            ollama: OllamaConfig::from_env(),
            chunking: ChunkingConfig::from_env(),
        }
    }
}

// ── Server ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub addr: String,
    pub data_dir: PathBuf,
}

impl ServerConfig {
    fn from_env() -> Self {
        Self {
            addr: env_or("VELLUM_ADDR", "0.0.0.0:8080"),
            data_dir: PathBuf::from(env_or("VELLUM_DATA_DIR", "data")),
        }
    }
}

// ── Ollama ────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OllamaConfig {
    pub url: String,
    pub embedding_model: String,
}

impl OllamaConfig {
    fn from_env() -> Self {
        Self {
            url: env_or("OLLAMA_URL", "http://localhost:11434"),
            embedding_model: env_or("OLLAMA_EMBEDDING_MODEL", "llama3.2"),
        }
    }
}

// ── Chunking defaults ─────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkingConfig {
    pub chunk_size: usize,
    pub overlap: usize,
}

impl ChunkingConfig {
    fn from_env() -> Self {
        Self {
            chunk_size: env_usize("VELLUM_CHUNK_SIZE", 1000),
            overlap: env_usize("VELLUM_CHUNK_OVERLAP", 200),
        }
    }
}
