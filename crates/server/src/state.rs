use std::sync::Arc;

use vellum_ingest::document::{FallbackExtractor, TextExtractor};
use vellum_ingest::Config;

use crate::store::RecordStore;

pub struct AppState {
    pub config: Config,
    pub extractor: Arc<dyn TextExtractor>,
    pub store: RecordStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = RecordStore::new(config.server.data_dir.join("documents"));
        Self {
            config,
            extractor: Arc::new(FallbackExtractor::default_chain()),
            store,
        }
    }
}
