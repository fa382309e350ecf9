mod app;
mod block_font;
mod theme;

use std::{
    fs::{self, OpenOptions},
    path::Path,
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{prelude::*, EnvFilter};
use whereto_core::{
    config::{self, AppConfig},
    Catalog,
};

const LOG_FILE: &str = "whereto.log";

#[tokio::main]
async fn main() -> Result<()> {
    config::ensure_default_config()?;
    let config = AppConfig::load()?;
    init_logging(&config.log_dir)?;

    let catalog = Arc::new(Catalog::load(config.catalog_dir.as_deref())?);
    info!(
        venues = catalog.venues().len(),
        events = catalog.events().len(),
        section = ?config.start_section,
        "Starting WhereTo?"
    );

    let mut app = app::WhereToApp::new(catalog, &config);
    app.run().await
}

/// Log to a file only; the terminal belongs to the UI while it runs.
fn init_logging(log_dir: &Path) -> Result<()> {
    fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;
    let log_path = log_dir.join(LOG_FILE);
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
