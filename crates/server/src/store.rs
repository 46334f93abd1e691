//! Disk-backed store for processed document records.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

use vellum_ingest::record::{ProcessedDocument, RecordError};

/// Persists one JSON record per document id and keeps an in-memory index.
///
/// Records are written through [`ProcessedDocument::write_json`], so each
/// file appears atomically once its batch has fully completed.
#[derive(Clone)]
pub struct RecordStore {
    dir: PathBuf,
    index: Arc<RwLock<HashMap<Uuid, PathBuf>>>,
}

impl RecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            index: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn record_path(&self, id: Uuid) -> PathBuf {
        self.dir.join(format!("{id}.json"))
    }

    /// Persist a record under a fresh id.
    pub async fn insert(&self, record: &ProcessedDocument) -> Result<Uuid, RecordError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let id = Uuid::new_v4();
        let path = self.record_path(id);
        record.write_json(&path).await?;
        self.index.write().await.insert(id, path);

        Ok(id)
    }

    /// Load a record by id; `None` when unknown.
    pub async fn get(&self, id: Uuid) -> Result<Option<ProcessedDocument>, RecordError> {
        let indexed = { self.index.read().await.get(&id).cloned() };
        let path = match indexed {
            Some(path) => path,
            None => {
                // Records written by a previous run are still on disk.
                let path = self.record_path(id);
                if !path.exists() {
                    return Ok(None);
                }
                path
            }
        };

        ProcessedDocument::read_json(&path).await.map(Some)
    }
}
