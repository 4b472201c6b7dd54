//! swgal - Entry Point

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use swgal::client::HttpCatalogClient;
use swgal::store::{CatalogStore, QuerySnapshot, StoreConfig};

/// Search and page through the Star Wars character catalog.
#[derive(Parser, Debug)]
#[command(name = "swgal")]
#[command(version)]
#[command(about = "Searchable Star Wars character catalog")]
pub struct Args {
    /// Search text; omit to list the whole catalog
    pub query: Option<String>,

    /// 1-based page to display (clamped to the catalog's page count)
    #[arg(short, long, default_value_t = 1)]
    pub page: u32,

    /// Catalog endpoint override
    #[arg(long)]
    pub api_url: Option<String>,

    /// Search debounce interval in milliseconds
    #[arg(long)]
    pub debounce_ms: Option<u64>,

    /// Per-request HTTP timeout in seconds
    #[arg(long)]
    pub timeout_secs: Option<u64>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Full precedence chain: defaults -> config file -> env vars -> CLI
    let config = {
        let file = swgal::config::load_config(args.config.clone())?;
        let merged = swgal::config::merge_config(file);
        let with_env = swgal::config::apply_env_overrides(merged);
        swgal::config::apply_cli_overrides(
            with_env,
            args.api_url.clone(),
            args.debounce_ms,
            args.timeout_secs,
        )
    };

    swgal::logging::init(&config.log_file_path)?;
    info!(config = ?config, "configuration loaded and resolved");

    let client = Arc::new(HttpCatalogClient::new(
        &config.api_url,
        config.request_timeout,
    )?);
    let store = CatalogStore::new(
        client,
        StoreConfig {
            debounce: config.debounce,
        },
    );
    let mut updates = store.subscribe();

    let query = args.query.clone().unwrap_or_default();
    store.set_search(query.clone());
    let first = settled(&mut updates, &query, 1).await?;

    // Explicit pagination only once the total is known, so the clamp at
    // the facade can do its job.
    let snapshot = if args.page > 1 {
        let landed = store.set_page(args.page);
        settled(&mut updates, &query, landed).await?
    } else {
        first
    };

    print!("{}", swgal::view::format_listing(&snapshot));
    Ok(())
}

/// Wait until the store has a settled result for the pair.
async fn settled(
    updates: &mut tokio::sync::watch::Receiver<QuerySnapshot>,
    search: &str,
    page: u32,
) -> Result<QuerySnapshot, tokio::sync::watch::error::RecvError> {
    let snapshot = updates.wait_for(|s| s.settled_for(search, page)).await?;
    Ok(snapshot.clone())
}
