//! OpenAPI documentation aggregator.
//!
//! Collects the `#[utoipa::path]`-annotated handlers and `ToSchema`-derived
//! types into one OpenAPI spec, served via Scalar UI at `/docs`.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "vellum API",
        version = "0.1.0",
        description = "PDF chunking and embedding service backed by a local Ollama instance.",
    ),
    tags(
        (name = "Health", description = "Server liveness"),
        (name = "Documents", description = "Document batch upload, processing, and record retrieval"),
    ),
    paths(
        crate::api::health::health,
        crate::api::documents::upload_documents,
        crate::api::documents::get_document,
    )
)]
pub struct ApiDoc;
