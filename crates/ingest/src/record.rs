//! The persisted chunk+embedding record and its JSON reader/writer.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::embedding::EmbeddedChunk;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Metadata block of a persisted document record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub file_name: String,
    pub total_pages: usize,
    pub processed_at: DateTime<Utc>,
    pub model: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
}

/// A fully processed document: metadata plus its embedded chunks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessedDocument {
    pub metadata: DocumentMetadata,
    pub chunks: Vec<EmbeddedChunk>,
}

impl ProcessedDocument {
    /// Number of chunks whose embedding request failed.
    pub fn failed_chunks(&self) -> usize {
        self.chunks.iter().filter(|c| c.error.is_some()).count()
    }

    /// Write the record as pretty JSON. The content goes to a sibling temp
    /// file first and replaces `path` in one rename, so readers never see
    /// a half-written record.
    pub async fn write_json(&self, path: &Path) -> Result<(), RecordError> {
        let json = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }

    /// Load a previously persisted record.
    pub async fn read_json(path: &Path) -> Result<Self, RecordError> {
        let data = tokio::fs::read_to_string(path).await?;
        Ok(serde_json::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> ProcessedDocument {
        ProcessedDocument {
            metadata: DocumentMetadata {
                file_name: "report.pdf".to_string(),
                total_pages: 4,
                processed_at: Utc::now(),
                model: "llama3.2".to_string(),
                chunk_size: 1000,
                chunk_overlap: 200,
            },
            chunks: vec![
                EmbeddedChunk {
                    text: "first chunk".to_string(),
                    index: 0,
                    start: 0,
                    end: 11,
                    embedding: Some(vec![0.25, -0.5]),
                    error: None,
                },
                EmbeddedChunk {
                    text: "second chunk".to_string(),
                    index: 1,
                    start: 8,
                    end: 20,
                    embedding: None,
                    error: Some("connection refused".to_string()),
                },
            ],
        }
    }

    #[test]
    fn wire_format_uses_camel_case_names() {
        let value = serde_json::to_value(sample_record()).unwrap();

        let metadata = &value["metadata"];
        assert!(metadata.get("fileName").is_some());
        assert!(metadata.get("totalPages").is_some());
        assert!(metadata.get("processedAt").is_some());
        assert!(metadata.get("chunkSize").is_some());
        assert!(metadata.get("chunkOverlap").is_some());

        let chunks = value["chunks"].as_array().unwrap();
        assert!(chunks[0]["embedding"].is_array());
        assert!(
            chunks[0].get("error").is_none(),
            "error field is omitted on success"
        );
        assert!(chunks[1]["embedding"].is_null());
        assert_eq!(chunks[1]["error"], "connection refused");
    }

    #[test]
    fn failed_chunk_count() {
        assert_eq!(sample_record().failed_chunks(), 1);
    }

    #[tokio::test]
    async fn json_round_trip_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        let record = sample_record();
        record.write_json(&path).await.unwrap();

        let loaded = ProcessedDocument::read_json(&path).await.unwrap();
        assert_eq!(loaded.metadata.file_name, "report.pdf");
        assert_eq!(loaded.chunks.len(), 2);
        assert_eq!(loaded.chunks[0].embedding, record.chunks[0].embedding);
        assert_eq!(loaded.chunks[1].error.as_deref(), Some("connection refused"));
    }

    #[tokio::test]
    async fn write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");

        sample_record().write_json(&path).await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("report.json")]);
    }
}
