//! Document batch upload and retrieval endpoints.

use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use vellum_ingest::embedding::OllamaEmbedder;
use vellum_ingest::pipeline::{process_document, ProcessOptions};
use vellum_ingest::record::ProcessedDocument;

use crate::state::AppState;

// ── Response types ────────────────────────────────

#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub file_name: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub document_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chunk_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_pages: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DocumentSummary {
    fn failure(file_name: String, error: String) -> Self {
        Self {
            file_name,
            success: false,
            document_id: None,
            chunk_count: None,
            total_pages: None,
            error: Some(error),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct BatchResponse {
    pub results: Vec<DocumentSummary>,
}

// ── Helpers ───────────────────────────────────────

async fn numeric_field(field: Field<'_>, name: &str) -> Result<usize, (StatusCode, String)> {
    let raw = field
        .text()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Failed to read '{name}': {e}")))?;
    raw.trim()
        .parse()
        .map_err(|_| (StatusCode::BAD_REQUEST, format!("Invalid {name}: '{raw}'")))
}

// ── POST /documents ───────────────────────────────

/// Upload and process one or more documents
///
/// Accepts multipart/form-data with one or more `file` parts (the legacy
/// `pdfFile` field name is accepted too) plus optional `chunkSize`,
/// `overlap`, and `modelName` text fields. Each document is extracted,
/// chunked, embedded, and persisted; a failure on one document does not
/// stop the rest of the batch.
#[utoipa::path(
    post,
    path = "/documents",
    tag = "Documents",
    request_body(content_type = "multipart/form-data", description = "Documents plus chunking options"),
    responses(
        (status = 200, description = "Per-document processing summary", body = BatchResponse),
        (status = 400, description = "Malformed request", body = String)
    )
)]
pub async fn upload_documents(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<BatchResponse>, (StatusCode, String)> {
    let mut files: Vec<(String, Vec<u8>)> = Vec::new();
    let mut chunk_size = state.config.chunking.chunk_size;
    let mut overlap = state.config.chunking.overlap;
    let mut model = state.config.ollama.embedding_model.clone();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| (StatusCode::BAD_REQUEST, format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" | "pdfFile" => {
                let file_name = field.file_name().unwrap_or("unnamed.pdf").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    (StatusCode::BAD_REQUEST, format!("Failed to read file: {e}"))
                })?;
                files.push((file_name, bytes.to_vec()));
            }
            "chunkSize" => chunk_size = numeric_field(field, "chunkSize").await?,
            "overlap" => overlap = numeric_field(field, "overlap").await?,
            "modelName" => {
                model = field.text().await.map_err(|e| {
                    (StatusCode::BAD_REQUEST, format!("Failed to read 'modelName': {e}"))
                })?;
            }
            other => warn!("ignoring unknown form field '{other}'"),
        }
    }

    if files.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "No file provided".to_string()));
    }

    let options = ProcessOptions {
        chunk_size,
        overlap,
        model,
        ..Default::default()
    };
    let embedder = OllamaEmbedder::new(state.config.ollama.url.clone(), options.model.clone());

    let mut results = Vec::with_capacity(files.len());
    for (file_name, bytes) in files {
        info!("processing '{}' ({} bytes)", file_name, bytes.len());

        let record = match process_document(
            state.extractor.as_ref(),
            &embedder,
            &bytes,
            &file_name,
            &options,
        )
        .await
        {
            Ok(record) => record,
            Err(e) => {
                warn!("processing failed for '{file_name}': {e}");
                results.push(DocumentSummary::failure(file_name, e.to_string()));
                continue;
            }
        };

        match state.store.insert(&record).await {
            Ok(id) => {
                info!(
                    "processed '{}': {} chunks ({} embedding failures), id {id}",
                    file_name,
                    record.chunks.len(),
                    record.failed_chunks(),
                );
                results.push(DocumentSummary {
                    file_name,
                    success: true,
                    document_id: Some(id),
                    chunk_count: Some(record.chunks.len()),
                    total_pages: Some(record.metadata.total_pages),
                    error: None,
                });
            }
            Err(e) => {
                results.push(DocumentSummary::failure(
                    file_name,
                    format!("Failed to persist record: {e}"),
                ));
            }
        }
    }

    Ok(Json(BatchResponse { results }))
}

// ── GET /documents/:id ────────────────────────────

/// Fetch the full persisted record for a processed document
#[utoipa::path(
    get,
    path = "/documents/{id}",
    tag = "Documents",
    params(("id" = String, Path, description = "Document UUID")),
    responses(
        (status = 200, description = "The persisted chunk+embedding record"),
        (status = 404, description = "Document not found", body = String)
    )
)]
pub async fn get_document(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProcessedDocument>, (StatusCode, String)> {
    match state.store.get(id).await {
        Ok(Some(record)) => Ok(Json(record)),
        Ok(None) => Err((StatusCode::NOT_FOUND, "Document not found".to_string())),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load record: {e}"),
        )),
    }
}
