mod grid;
mod table;
mod zoom;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use dashboard_lib::store::{KeyValueStore, MemoryStore, SqliteStore};
use log::{info, warn};

use crate::args::{Cli, Commands};
use crate::config::CliConfig;
use crate::paths;

pub fn run(cli: Cli) -> Result<()> {
    let Cli {
        config,
        store,
        command,
        ..
    } = cli;

    let config = match config.or_else(paths::config_file) {
        Some(path) => CliConfig::load_from(&path)?,
        None => CliConfig::default(),
    };

    match command {
        Commands::Table(args) => table::run(&config, args),
        Commands::Grid { command } => {
            let store = open_store(store.as_deref(), &config)?;
            grid::run(&config, store, command)
        }
        Commands::Zoom { command } => {
            let store = open_store(store.as_deref(), &config)?;
            zoom::run(store, command)
        }
    }
}

/// Open the settings store: `--store`, then `[storage] path`, then the
/// platform data directory. Without any of them state lives in memory.
fn open_store(explicit: Option<&Path>, config: &CliConfig) -> Result<Arc<dyn KeyValueStore>> {
    let path: Option<PathBuf> = explicit
        .map(Path::to_path_buf)
        .or_else(|| config.storage.path.clone())
        .or_else(paths::settings_db);

    match path {
        Some(path) => {
            info!("Opening settings store {}", path.display());
            let store = SqliteStore::open(&path)
                .with_context(|| format!("Failed to open settings store {}", path.display()))?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("No data directory available; settings will not be saved");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}
