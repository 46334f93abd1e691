//! HTTP router construction.

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

use crate::api;
use crate::state::AppState;

/// Build the application router with all routes and middleware.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health::health))
        .route(
            "/documents",
            post(api::documents::upload_documents)
                .layer(DefaultBodyLimit::max(100 * 1024 * 1024)),
        )
        .route("/documents/{id}", get(api::documents::get_document))
        .layer(CorsLayer::permissive())
        .with_state(state)
        .merge(Scalar::with_url("/docs", api::doc::ApiDoc::openapi()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::util::ServiceExt;
    use uuid::Uuid;

    use vellum_ingest::Config;

    fn test_state() -> Arc<AppState> {
        let mut config = Config::from_env();
        config.server.data_dir =
            std::env::temp_dir().join(format!("vellum-router-test-{}", Uuid::new_v4()));
        Arc::new(AppState::new(config))
    }

    const BOUNDARY: &str = "vellum-test-boundary";

    fn multipart_request(body: String) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/documents")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    fn file_part(name: &str, filename: &str, contents: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
             filename=\"{filename}\"\r\nContent-Type: application/octet-stream\r\n\r\n{contents}\r\n"
        )
    }

    fn text_part(name: &str, value: &str) -> String {
        format!(
            "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        )
    }

    #[tokio::test]
    async fn health_returns_ok() {
        let app = build_router(test_state());
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_document_returns_404() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::get(format!("/documents/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn upload_without_file_is_rejected() {
        let app = build_router(test_state());
        let body = format!("{}--{BOUNDARY}--\r\n", text_part("chunkSize", "500"));
        let response = app.oneshot(multipart_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn malformed_chunk_size_is_rejected() {
        let app = build_router(test_state());
        let body = format!(
            "{}{}--{BOUNDARY}--\r\n",
            text_part("chunkSize", "not-a-number"),
            file_part("file", "note.txt", "Some text."),
        );
        let response = app.oneshot(multipart_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn batch_reports_per_document_outcomes() {
        // One processable text file, one unsupported extension. With no
        // Ollama reachable, chunks carry error fields, but the document
        // itself still processes and persists.
        let state = test_state();
        let app = build_router(state.clone());

        let body = format!(
            "{}{}{}--{BOUNDARY}--\r\n",
            text_part("chunkSize", "40"),
            file_part(
                "file",
                "note.txt",
                "Hello world. This is a test. Hello world again.",
            ),
            file_part("file", "image.gif", "GIF89a"),
        );
        let response = app.oneshot(multipart_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        let results = value["results"].as_array().unwrap();
        assert_eq!(results.len(), 2);

        assert_eq!(results[0]["fileName"], "note.txt");
        assert_eq!(results[0]["success"], true);
        assert!(results[0]["chunkCount"].as_u64().unwrap() >= 1);
        let id = results[0]["documentId"].as_str().unwrap();

        assert_eq!(results[1]["fileName"], "image.gif");
        assert_eq!(results[1]["success"], false);
        assert!(results[1]["error"].as_str().unwrap().contains("gif"));

        // The persisted record is retrievable by its id.
        let app = build_router(state);
        let response = app
            .oneshot(
                Request::get(format!("/documents/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let record: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(record["metadata"]["fileName"], "note.txt");
        assert_eq!(record["metadata"]["chunkSize"], 40);
        assert!(!record["chunks"].as_array().unwrap().is_empty());
    }
}
