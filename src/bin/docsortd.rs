//! docsortd: document classification daemon.
//!
//! Serves the [`DocumentService`](docsort::DocumentService) over HTTP,
//! storing every classified upload in SQLite.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use docsort::DocumentService;
use docsort::config::{Config, Secrets};
use docsort::server::{AppState, create_router};
use docsort::store::SqliteStore;

/// docsort daemon: upload, classify and list documents.
#[derive(Parser)]
#[command(name = "docsortd")]
#[command(version = docsort::PKG_VERSION)]
#[command(about = "Document classification daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let config = Config::load(args.config.as_deref())?;
    let secrets = Secrets::load()?;

    let engine = config.build_engine(&secrets)?;
    let store = SqliteStore::connect(&config.storage.database_url).await?;
    let service = DocumentService::new(engine, Arc::new(store));

    let addr: SocketAddr = config.server.address.parse().map_err(|e| {
        docsort::DocsortError::Configuration(format!("Invalid address: {e}"))
    })?;

    let categories = service.engine().categories().labels().join(", ");
    info!(
        version = docsort::version_string(),
        %addr,
        provider = service.engine().provider_name(),
        categories = %categories,
        "docsortd starting"
    );

    let router = create_router(AppState::new(service), &config.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("docsortd stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
