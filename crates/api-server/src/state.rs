//! Shared application state handed to every handler.

use starlight_ads::AdConsole;
use starlight_core::config::AppConfig;
use starlight_feed::FeedBuilder;
use starlight_genai::{GenAiService, GenerativeBackend, VideoJobs};
use starlight_payments::PaymentLedger;
use starlight_store::{Library, Storage};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct AppState {
    pub node_id: String,
    pub start_time: Instant,
    pub storage: Storage,
    pub library: Library,
    pub console: AdConsole,
    pub feeds: FeedBuilder,
    pub genai: GenAiService,
    pub videos: VideoJobs,
    pub payments: PaymentLedger,
}

impl AppState {
    pub fn new(config: &AppConfig, storage: Storage, backend: Arc<dyn GenerativeBackend>) -> Self {
        let genai = GenAiService::from_config(backend, storage.clone(), &config.genai);
        Self {
            node_id: config.node_id.clone(),
            start_time: Instant::now(),
            storage: storage.clone(),
            library: Library::new(storage.clone()),
            console: AdConsole::new(storage.clone()),
            feeds: FeedBuilder::new(storage),
            videos: VideoJobs::from_config(genai.clone(), &config.genai),
            genai,
            payments: PaymentLedger::seeded(),
        }
    }
}
