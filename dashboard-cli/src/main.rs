mod args;
mod commands;
mod config;
mod paths;

use std::fs::{self, File};

use clap::Parser;
use log::{debug, error, info};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::args::Cli;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_level.into());
    info!("dashboard {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = commands::run(cli) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

/// Log to the platform cache directory, rotating the previous run's log.
fn init_logging(level: LevelFilter) {
    if level == LevelFilter::Off {
        return;
    }
    let rotation_failures = paths::rotate_logs();

    let Some(path) = paths::log_file() else { return };
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(level, Config::default(), file);
            for failure in rotation_failures {
                debug!("Failed to rotate log {}: {}", failure.path.display(), failure.error);
            }
        }
        Err(e) => eprintln!("Failed to create log file {}: {}", path.display(), e),
    }
}
