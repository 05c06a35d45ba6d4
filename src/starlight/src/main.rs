//! StarLight — video platform demo with an ad console and generative studio.
//!
//! Main entry point: loads configuration, opens storage and starts the server.

use clap::Parser;
use starlight_api::{ApiServer, AppState};
use starlight_core::config::{AppConfig, StorageBackend};
use starlight_genai::GeminiBackend;
use starlight_store::{FileStore, KvStore, MemoryStore, Storage};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "starlight")]
#[command(about = "Video platform demo with ad placement and generative tooling")]
#[command(version)]
struct Cli {
    /// Node identifier (overrides config)
    #[arg(long, env = "STARLIGHT__NODE_ID")]
    node_id: Option<String>,

    /// HTTP port (overrides config)
    #[arg(long, env = "STARLIGHT__API__HTTP_PORT")]
    http_port: Option<u16>,

    /// Directory for persisted namespaces (overrides config)
    #[arg(long, env = "STARLIGHT__STORAGE__DATA_DIR")]
    data_dir: Option<String>,

    /// Keep everything in memory; nothing survives a restart
    #[arg(long, default_value_t = false)]
    memory: bool,

    /// Do not start the Prometheus exporter
    #[arg(long, default_value_t = false)]
    no_metrics: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "starlight=info,starlight_api=info,tower_http=info".into()),
        )
        .json()
        .init();

    let cli = Cli::parse();

    info!("StarLight starting up");

    let mut config = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Failed to load config, using defaults");
        AppConfig::default()
    });

    // Apply CLI overrides
    if let Some(node_id) = cli.node_id {
        config.node_id = node_id;
    }
    if let Some(port) = cli.http_port {
        config.api.http_port = port;
    }
    if let Some(dir) = cli.data_dir {
        config.storage.data_dir = dir;
    }
    if cli.memory {
        config.storage.backend = StorageBackend::Memory;
    }
    if cli.no_metrics {
        config.metrics.enabled = false;
    }

    info!(
        node_id = %config.node_id,
        http_port = config.api.http_port,
        storage = ?config.storage.backend,
        genai_key_configured = config.genai.api_key.is_some(),
        "Configuration loaded"
    );

    // Local namespaces persist per the configured backend; session ones never do
    let storage = match config.storage.backend {
        StorageBackend::File => {
            let local: Arc<dyn KvStore> = Arc::new(FileStore::open(&config.storage.data_dir)?);
            Storage::new(local, Arc::new(MemoryStore::new()))
        }
        StorageBackend::Memory => Storage::in_memory(),
    };

    let backend = Arc::new(GeminiBackend::from_config(&config.genai));
    if !backend.has_api_key() {
        warn!("No generative API key configured; generated content will use fallbacks");
    }

    let state = AppState::new(&config, storage, backend);
    let api_server = ApiServer::new(config.clone(), state);

    if config.metrics.enabled {
        if let Err(e) = api_server.start_metrics() {
            error!(error = %e, "Failed to start metrics exporter");
        }
    }

    info!("StarLight is ready to serve traffic");

    // Blocks until shutdown
    api_server.start_http().await?;

    Ok(())
}
