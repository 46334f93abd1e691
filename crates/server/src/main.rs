//! vellum-server — HTTP batch API for PDF chunking and embedding.

mod api;
mod router;
mod state;
mod store;

use std::sync::Arc;

use tracing::info;

use vellum_ingest::config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    config::load_dotenv();
    let cfg = config::Config::from_env();

    let addr = cfg.server.addr.clone();
    let state = Arc::new(state::AppState::new(cfg));
    let app = router::build_router(state);

    info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
